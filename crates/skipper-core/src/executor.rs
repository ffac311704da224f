use tracing::{debug, instrument};

use skipper_model::{LABEL_COMMIT_HASH, LABEL_LAST_DEPLOY, Service, ServiceSpec};

use crate::error::CoreError;
use crate::orchestrator::{Orchestrator, UpdateOptions, UpdateOutcome};

/// Applies a rollout to a resolved service.
///
/// The executor touches exactly four fields of the spec (the container
/// image, plus the deploy labels at container and service level) and submits
/// the *entire* spec back: the cluster's update semantics replace the full
/// spec for the version being advanced, so partial payloads would wipe
/// unrelated settings.
pub struct UpdateExecutor<'a> {
    orchestrator: &'a dyn Orchestrator,
}

impl<'a> UpdateExecutor<'a> {
    pub fn new(orchestrator: &'a dyn Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Stamp the rollout onto `service` and submit it.
    ///
    /// The submission carries the ID and version token captured at resolve
    /// time. A stale token (another updater got there first) fails the call;
    /// there is deliberately no re-read-and-retry, since a retry would
    /// overwrite whatever the concurrent updater changed.
    ///
    /// Returns the cluster's non-fatal warnings on success.
    #[instrument(
        level = "debug",
        skip_all,
        fields(service = %service.spec.name, image = %image)
    )]
    pub async fn apply_update(
        &self,
        mut service: Service,
        image: &str,
        commit: &str,
        deployed_at: &str,
    ) -> Result<UpdateOutcome, CoreError> {
        stamp_rollout(&mut service.spec, image, commit, deployed_at);

        let outcome = self
            .orchestrator
            .update_service(
                &service.id,
                service.version.index,
                &service.spec,
                UpdateOptions {
                    query_registry: true,
                },
            )
            .await?;

        if !outcome.warnings.is_empty() {
            debug!(warnings = outcome.warnings.len(), "update accepted with warnings");
        }
        Ok(outcome)
    }
}

/// Write the rollout fields into a spec. Everything else is left untouched.
fn stamp_rollout(spec: &mut ServiceSpec, image: &str, commit: &str, deployed_at: &str) {
    let container = &mut spec.task_template.container_spec;
    container.image = image.to_string();
    container.labels.set(LABEL_LAST_DEPLOY, deployed_at);
    container.labels.set(LABEL_COMMIT_HASH, commit);

    spec.labels.set(LABEL_COMMIT_HASH, commit);
    spec.labels.set(LABEL_LAST_DEPLOY, deployed_at);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Map, json};

    use skipper_model::{Service, ServiceSpec, ServiceVersion};

    use super::{UpdateExecutor, stamp_rollout};
    use crate::error::CoreError;
    use crate::orchestrator::{Orchestrator, OrchestratorError, UpdateOptions, UpdateOutcome};

    const TS: &str = "2026-08-30T12:00:00Z";

    fn service_at(version: u64) -> Service {
        let mut spec = ServiceSpec {
            name: "web".to_string(),
            ..ServiceSpec::default()
        };
        spec.task_template.container_spec.image = "registry/web:v1".to_string();
        spec.labels.set("team", "platform");
        spec.rest
            .insert("Mode".into(), json!({"Replicated": {"Replicas": 3}}));
        spec.task_template
            .rest
            .insert("RestartPolicy".into(), json!({"Condition": "any"}));
        spec.task_template
            .container_spec
            .rest
            .insert("Env".into(), json!(["RUST_LOG=info"]));

        Service {
            id: "svc-1".to_string(),
            version: ServiceVersion {
                index: version,
                rest: Map::new(),
            },
            spec,
            rest: Map::new(),
        }
    }

    struct Submission {
        id: String,
        version: u64,
        spec: ServiceSpec,
        query_registry: bool,
    }

    /// Cluster fake that enforces the optimistic-concurrency token: a
    /// submission succeeds only when it carries the current version, and
    /// every success advances the version.
    struct FakeCluster {
        current_version: Mutex<u64>,
        warnings: Vec<String>,
        submissions: Mutex<Vec<Submission>>,
    }

    impl FakeCluster {
        fn at_version(version: u64) -> Self {
            Self {
                current_version: Mutex::new(version),
                warnings: Vec::new(),
                submissions: Mutex::new(Vec::new()),
            }
        }

        fn with_warnings(mut self, warnings: &[&str]) -> Self {
            self.warnings = warnings.iter().map(|w| w.to_string()).collect();
            self
        }
    }

    #[async_trait]
    impl Orchestrator for FakeCluster {
        async fn list_services(
            &self,
            _name_filter: Option<&str>,
        ) -> Result<Vec<Service>, OrchestratorError> {
            Ok(Vec::new())
        }

        async fn update_service(
            &self,
            id: &str,
            version: u64,
            spec: &ServiceSpec,
            opts: UpdateOptions,
        ) -> Result<UpdateOutcome, OrchestratorError> {
            self.submissions.lock().unwrap().push(Submission {
                id: id.to_string(),
                version,
                spec: spec.clone(),
                query_registry: opts.query_registry,
            });

            let mut current = self.current_version.lock().unwrap();
            if version != *current {
                return Err(OrchestratorError::Api {
                    status: 500,
                    message: "update out of sequence".into(),
                });
            }
            *current += 1;
            Ok(UpdateOutcome {
                warnings: self.warnings.clone(),
            })
        }
    }

    #[test]
    fn stamp_touches_exactly_the_documented_fields() {
        let original = service_at(7).spec;
        let mut stamped = original.clone();
        stamp_rollout(&mut stamped, "registry/web:v2", "abcd123", TS);

        assert_eq!(stamped.task_template.container_spec.image, "registry/web:v2");
        assert_eq!(
            stamped.task_template.container_spec.labels.get("commit_hash"),
            Some("abcd123")
        );
        assert_eq!(
            stamped.task_template.container_spec.labels.get("last_deploy"),
            Some(TS)
        );
        assert_eq!(stamped.labels.get("commit_hash"), Some("abcd123"));
        assert_eq!(stamped.labels.get("last_deploy"), Some(TS));

        // Undo the four documented mutations; the result must be identical
        // to the pre-mutation spec, proving nothing else was touched.
        let mut reverted = stamped;
        reverted.task_template.container_spec.image = original.task_template.container_spec.image.clone();
        reverted.task_template.container_spec.labels =
            original.task_template.container_spec.labels.clone();
        reverted.labels = original.labels.clone();
        assert_eq!(reverted, original);
    }

    #[tokio::test]
    async fn submits_the_full_spec_with_the_captured_version() {
        let cluster = FakeCluster::at_version(7);
        let executor = UpdateExecutor::new(&cluster);

        executor
            .apply_update(service_at(7), "registry/web:v2", "abcd123", TS)
            .await
            .unwrap();

        let submissions = cluster.submissions.lock().unwrap();
        assert_eq!(submissions.len(), 1);
        let sub = &submissions[0];
        assert_eq!(sub.id, "svc-1");
        assert_eq!(sub.version, 7);
        assert!(sub.query_registry);
        assert_eq!(sub.spec.task_template.container_spec.image, "registry/web:v2");
        // Untouched settings ride along in the resubmitted spec.
        assert_eq!(
            sub.spec.rest.get("Mode").unwrap(),
            &json!({"Replicated": {"Replicas": 3}})
        );
        assert_eq!(sub.spec.labels.get("team"), Some("platform"));
    }

    #[tokio::test]
    async fn warnings_are_relayed_without_failing() {
        let cluster = FakeCluster::at_version(7)
            .with_warnings(&["image could not be accessed on a registry to record its digest"]);
        let executor = UpdateExecutor::new(&cluster);

        let outcome = executor
            .apply_update(service_at(7), "registry/web:v2", "abcd123", TS)
            .await
            .unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("registry"));
    }

    #[tokio::test]
    async fn replaying_a_captured_token_fails_the_second_time() {
        let cluster = FakeCluster::at_version(7);
        let executor = UpdateExecutor::new(&cluster);

        // First submission with token 7 advances the cluster to 8.
        executor
            .apply_update(service_at(7), "registry/web:v2", "abcd123", TS)
            .await
            .unwrap();

        // Same captured token again: the cluster rejects it, and the error
        // is an infrastructure failure, never a silent retry or merge.
        let err = executor
            .apply_update(service_at(7), "registry/web:v2", "abcd123", TS)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Orchestrator(_)));

        assert_eq!(cluster.submissions.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_commit_is_stamped_verbatim() {
        let cluster = FakeCluster::at_version(7);
        let executor = UpdateExecutor::new(&cluster);

        executor
            .apply_update(service_at(7), "registry/web:v2", "", TS)
            .await
            .unwrap();

        let submissions = cluster.submissions.lock().unwrap();
        assert_eq!(submissions[0].spec.labels.get("commit_hash"), Some(""));
    }
}
