//! Release and error-propagation contract of the copy orchestrator
//!
//! Every scenario runs against both release policies through the same
//! `CopyOrchestrator` API.

use copier_core::{
    CopierConfig, CopyOrchestrator, Error, FailureKind, OutcomeError, ReleasePolicy, ResourceRole,
};
use copier_test_utils::builders::{
    CONNECTION_CLOSE_FAILURE, CONNECTION_OPEN_FAILURE, COPY_FAILURE, WRITER_CLOSE_FAILURE,
    WRITER_OPEN_FAILURE,
};
use copier_test_utils::{Interaction, InteractionLog, MockAcquirer, ScenarioBuilder};

const QUERY: &str = "select 1 from account";
const FILE_NAME: &str = "account.csv";

fn run(
    policy: ReleasePolicy,
    scenario: ScenarioBuilder,
) -> (Result<(), OutcomeError>, InteractionLog) {
    let mock = scenario.build();
    let log = mock.log();
    let orchestrator = CopyOrchestrator::new(mock, policy);
    (orchestrator.copy_result_set_to_file(QUERY, FILE_NAME), log)
}

fn suppressed_messages(outcome: &OutcomeError) -> Vec<String> {
    outcome.suppressed().iter().map(Error::message).collect()
}

fn copy_rows(connection_present: bool, writer_present: bool) -> Interaction {
    Interaction::CopyRows {
        query: QUERY.to_string(),
        connection_present,
        writer_present,
    }
}

fn acquired_both() -> Vec<Interaction> {
    vec![
        Interaction::AcquireConnection,
        Interaction::AcquireWriter(FILE_NAME.to_string()),
    ]
}

mod happy_path_tests {
    use super::*;

    #[test]
    fn test_scoped_closes_writer_then_connection() {
        let (result, log) = run(ReleasePolicy::Scoped, ScenarioBuilder::new());

        assert!(result.is_ok());
        let mut expected = acquired_both();
        expected.push(copy_rows(true, true));
        expected.push(Interaction::Close(ResourceRole::Writer));
        expected.push(Interaction::Close(ResourceRole::Connection));
        assert_eq!(log.snapshot(), expected);
    }

    #[test]
    fn test_manual_closes_connection_then_writer() {
        let (result, log) = run(ReleasePolicy::Manual, ScenarioBuilder::new());

        assert!(result.is_ok());
        let mut expected = acquired_both();
        expected.push(copy_rows(true, true));
        expected.push(Interaction::Close(ResourceRole::Connection));
        expected.push(Interaction::Close(ResourceRole::Writer));
        assert_eq!(log.snapshot(), expected);
    }

    #[test]
    fn test_each_resource_closed_exactly_once() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (_, log) = run(policy, ScenarioBuilder::new());

            assert_eq!(log.count(&Interaction::Close(ResourceRole::Writer)), 1);
            assert_eq!(log.count(&Interaction::Close(ResourceRole::Connection)), 1);
        }
    }
}

mod absent_resource_tests {
    use super::*;

    #[test]
    fn test_absent_connection_is_not_closed() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (result, log) = run(policy, ScenarioBuilder::new().connection_absent());

            assert!(result.is_ok(), "{policy} should succeed");
            let mut expected = acquired_both();
            expected.push(copy_rows(false, true));
            expected.push(Interaction::Close(ResourceRole::Writer));
            assert_eq!(log.snapshot(), expected);
        }
    }

    #[test]
    fn test_both_absent_still_copies_without_closing() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (result, log) = run(
                policy,
                ScenarioBuilder::new().connection_absent().writer_absent(),
            );

            assert!(result.is_ok(), "{policy} should succeed");
            let mut expected = acquired_both();
            expected.push(copy_rows(false, false));
            assert_eq!(log.snapshot(), expected);
            assert!(log.closes().is_empty());
        }
    }

    #[test]
    fn test_absent_writer_still_closes_connection() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (result, log) = run(policy, ScenarioBuilder::new().writer_absent());

            assert!(result.is_ok(), "{policy} should succeed");
            assert_eq!(log.closes(), vec![ResourceRole::Connection]);
            assert_eq!(log.count(&copy_rows(true, false)), 1);
        }
    }
}

mod close_failure_tests {
    use super::*;

    #[test]
    fn test_scoped_surfaces_connection_close_failure() {
        let (result, log) = run(
            ReleasePolicy::Scoped,
            ScenarioBuilder::new().connection_close_fails(),
        );

        let outcome = result.unwrap_err();
        assert_eq!(outcome.kind(), FailureKind::CloseError);
        assert_eq!(outcome.message(), CONNECTION_CLOSE_FAILURE);
        assert!(outcome.suppressed().is_empty());
        assert_eq!(
            log.closes(),
            vec![ResourceRole::Writer, ResourceRole::Connection]
        );
    }

    #[test]
    fn test_manual_discards_connection_close_failure() {
        let (result, log) = run(
            ReleasePolicy::Manual,
            ScenarioBuilder::new().connection_close_fails(),
        );

        assert!(result.is_ok());
        assert_eq!(
            log.closes(),
            vec![ResourceRole::Connection, ResourceRole::Writer]
        );
    }

    #[test]
    fn test_scoped_surfaces_writer_close_failure() {
        let (result, _) = run(
            ReleasePolicy::Scoped,
            ScenarioBuilder::new().writer_close_fails(),
        );

        let outcome = result.unwrap_err();
        assert_eq!(outcome.kind(), FailureKind::CloseError);
        assert_eq!(outcome.message(), WRITER_CLOSE_FAILURE);
        assert!(outcome.suppressed().is_empty());
    }

    #[test]
    fn test_scoped_last_close_failure_is_primary() {
        let (result, log) = run(
            ReleasePolicy::Scoped,
            ScenarioBuilder::new()
                .connection_close_fails()
                .writer_close_fails(),
        );

        let outcome = result.unwrap_err();
        assert_eq!(outcome.message(), CONNECTION_CLOSE_FAILURE);
        assert_eq!(suppressed_messages(&outcome), vec![WRITER_CLOSE_FAILURE]);
        match &outcome.suppressed()[0] {
            Error::Release(release) => assert_eq!(release.resource, ResourceRole::Writer),
            other => panic!("Expected release error, got {other:?}"),
        }
        assert_eq!(
            log.closes(),
            vec![ResourceRole::Writer, ResourceRole::Connection]
        );
    }

    #[test]
    fn test_manual_discards_both_close_failures() {
        let (result, log) = run(
            ReleasePolicy::Manual,
            ScenarioBuilder::new()
                .connection_close_fails()
                .writer_close_fails(),
        );

        assert!(result.is_ok());
        assert_eq!(log.closes().len(), 2);
    }
}

mod copy_failure_tests {
    use super::*;

    #[test]
    fn test_copy_failure_with_clean_releases() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (result, log) = run(policy, ScenarioBuilder::new().copy_fails());

            let outcome = result.unwrap_err();
            assert_eq!(outcome.kind(), FailureKind::CopyError);
            assert_eq!(outcome.message(), COPY_FAILURE);
            assert!(outcome.suppressed().is_empty(), "{policy} suppressed errors");
            assert_eq!(log.closes().len(), 2);
        }
    }

    #[test]
    fn test_scoped_copy_failure_keeps_close_failures_in_release_order() {
        let (result, log) = run(
            ReleasePolicy::Scoped,
            ScenarioBuilder::new()
                .copy_fails()
                .writer_close_fails()
                .connection_close_fails(),
        );

        let outcome = result.unwrap_err();
        assert_eq!(outcome.kind(), FailureKind::CopyError);
        assert_eq!(outcome.message(), COPY_FAILURE);
        assert_eq!(
            suppressed_messages(&outcome),
            vec![WRITER_CLOSE_FAILURE, CONNECTION_CLOSE_FAILURE]
        );
        assert!(
            outcome
                .suppressed()
                .iter()
                .all(|e| e.kind() == FailureKind::CloseError)
        );
        assert_eq!(
            log.closes(),
            vec![ResourceRole::Writer, ResourceRole::Connection]
        );
    }

    #[test]
    fn test_manual_copy_failure_drops_close_failures() {
        let (result, log) = run(
            ReleasePolicy::Manual,
            ScenarioBuilder::new()
                .copy_fails()
                .writer_close_fails()
                .connection_close_fails(),
        );

        let outcome = result.unwrap_err();
        assert_eq!(outcome.message(), COPY_FAILURE);
        assert!(outcome.suppressed().is_empty());
        assert_eq!(
            log.closes(),
            vec![ResourceRole::Connection, ResourceRole::Writer]
        );
    }
}

mod acquisition_failure_tests {
    use super::*;

    #[test]
    fn test_connection_failure_short_circuits() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (result, log) = run(policy, ScenarioBuilder::new().connection_fails());

            let outcome = result.unwrap_err();
            assert_eq!(outcome.kind(), FailureKind::ConnectionError);
            assert_eq!(outcome.message(), CONNECTION_OPEN_FAILURE);
            assert!(outcome.suppressed().is_empty());
            assert_eq!(log.snapshot(), vec![Interaction::AcquireConnection]);
        }
    }

    #[test]
    fn test_writer_failure_closes_connection() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (result, log) = run(policy, ScenarioBuilder::new().writer_fails());

            let outcome = result.unwrap_err();
            assert_eq!(outcome.kind(), FailureKind::WriterError);
            assert_eq!(outcome.message(), WRITER_OPEN_FAILURE);
            assert!(outcome.suppressed().is_empty());
            assert!(!log.copied(), "{policy} must not copy");
            assert_eq!(log.closes(), vec![ResourceRole::Connection]);
        }
    }

    #[test]
    fn test_scoped_writer_failure_suppresses_connection_close_failure() {
        let (result, _) = run(
            ReleasePolicy::Scoped,
            ScenarioBuilder::new()
                .writer_fails()
                .connection_close_fails(),
        );

        let outcome = result.unwrap_err();
        assert_eq!(outcome.kind(), FailureKind::WriterError);
        assert_eq!(suppressed_messages(&outcome), vec![CONNECTION_CLOSE_FAILURE]);
    }

    #[test]
    fn test_manual_writer_failure_discards_connection_close_failure() {
        let (result, log) = run(
            ReleasePolicy::Manual,
            ScenarioBuilder::new()
                .writer_fails()
                .connection_close_fails(),
        );

        let outcome = result.unwrap_err();
        assert_eq!(outcome.kind(), FailureKind::WriterError);
        assert!(outcome.suppressed().is_empty());
        assert_eq!(log.closes(), vec![ResourceRole::Connection]);
    }

    #[test]
    fn test_writer_failure_with_absent_connection_closes_nothing() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let (result, log) = run(
                policy,
                ScenarioBuilder::new().connection_absent().writer_fails(),
            );

            assert_eq!(result.unwrap_err().kind(), FailureKind::WriterError);
            assert!(log.closes().is_empty());
        }
    }
}

mod panic_tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    fn run_panicking(policy: ReleasePolicy, scenario: ScenarioBuilder) -> InteractionLog {
        let mock = scenario.copy_panics().build();
        let log = mock.log();
        let orchestrator = CopyOrchestrator::new(mock, policy);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            orchestrator.copy_result_set_to_file(QUERY, FILE_NAME)
        }));

        assert!(result.is_err(), "{policy} should propagate the panic");
        log
    }

    #[test]
    fn test_scoped_panic_closes_writer_then_connection() {
        let log = run_panicking(ReleasePolicy::Scoped, ScenarioBuilder::new());

        assert!(log.copied());
        assert_eq!(
            log.closes(),
            vec![ResourceRole::Writer, ResourceRole::Connection]
        );
    }

    #[test]
    fn test_manual_panic_closes_connection_then_writer() {
        let log = run_panicking(ReleasePolicy::Manual, ScenarioBuilder::new());

        assert!(log.copied());
        assert_eq!(
            log.closes(),
            vec![ResourceRole::Connection, ResourceRole::Writer]
        );
    }

    #[test]
    fn test_panic_with_close_failures_still_closes_both() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let log = run_panicking(
                policy,
                ScenarioBuilder::new()
                    .connection_close_fails()
                    .writer_close_fails(),
            );

            assert_eq!(log.count(&Interaction::Close(ResourceRole::Writer)), 1);
            assert_eq!(log.count(&Interaction::Close(ResourceRole::Connection)), 1);
        }
    }

    #[test]
    fn test_panic_with_absent_writer_closes_connection_only() {
        for policy in [ReleasePolicy::Scoped, ReleasePolicy::Manual] {
            let log = run_panicking(policy, ScenarioBuilder::new().writer_absent());

            assert_eq!(log.closes(), vec![ResourceRole::Connection]);
        }
    }
}

mod orchestrator_api_tests {
    use super::*;

    #[test]
    fn test_policy_from_config() {
        let config = CopierConfig {
            policy: ReleasePolicy::Manual,
            ..CopierConfig::default()
        };

        let orchestrator = CopyOrchestrator::from_config(MockAcquirer::new(), &config);
        assert_eq!(orchestrator.policy(), ReleasePolicy::Manual);
        assert_eq!(
            CopyOrchestrator::scoped(MockAcquirer::new()).policy(),
            ReleasePolicy::Scoped
        );
    }

    #[test]
    fn test_test_connection_hands_out_unclosed_connection() {
        let mock = MockAcquirer::new();
        let log = mock.log();
        let orchestrator = CopyOrchestrator::manual(mock);

        let connection = orchestrator.test_connection().unwrap();

        assert_eq!(
            connection.map(|c| c.role()),
            Some(ResourceRole::Connection)
        );
        assert_eq!(log.snapshot(), vec![Interaction::AcquireConnection]);
    }

    #[test]
    fn test_test_connection_propagates_failure() {
        let mock = ScenarioBuilder::new().connection_fails().build();
        let orchestrator = CopyOrchestrator::scoped(mock);

        let err = orchestrator.test_connection().unwrap_err();
        assert_eq!(err.kind(), FailureKind::ConnectionError);
    }

    #[test]
    fn test_orchestrator_works_through_a_reference() {
        let mock = MockAcquirer::new();
        let orchestrator = CopyOrchestrator::scoped(&mock);

        assert!(orchestrator.copy_result_set_to_file(QUERY, FILE_NAME).is_ok());
        assert_eq!(mock.log().closes().len(), 2);
    }

    #[test]
    fn test_concurrent_calls_are_independent() {
        let mock = ScenarioBuilder::new().connection_close_fails().build();
        let log = mock.log();
        let orchestrator = CopyOrchestrator::scoped(mock);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let outcome = orchestrator
                        .copy_result_set_to_file(QUERY, FILE_NAME)
                        .unwrap_err();
                    assert_eq!(outcome.message(), CONNECTION_CLOSE_FAILURE);
                    assert!(outcome.suppressed().is_empty());
                });
            }
        });

        assert_eq!(log.count(&Interaction::Close(ResourceRole::Writer)), 4);
        assert_eq!(log.count(&Interaction::Close(ResourceRole::Connection)), 4);
    }

    #[test]
    fn test_outcome_display_mentions_every_failure() {
        let (result, _) = run(
            ReleasePolicy::Scoped,
            ScenarioBuilder::new()
                .copy_fails()
                .writer_close_fails()
                .connection_close_fails(),
        );

        let rendered = result.unwrap_err().to_string();
        assert!(rendered.contains(COPY_FAILURE));
        assert!(rendered.contains(WRITER_CLOSE_FAILURE));
        assert!(rendered.contains(CONNECTION_CLOSE_FAILURE));
    }
}
