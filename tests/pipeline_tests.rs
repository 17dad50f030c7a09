use coverage_navigator::core::{
    schema::DEFAULT_DISCRIMINANT, schemas::repo_overview_schema, ErrorKind, MemorySink, OwnerQuery, QueryPipeline,
    RepoOverview, ResponseValidator, RouteRefDescriptor,
};
use coverage_navigator::{compute_new_path, RedirectTracker};

mod common;
use common::fixtures::*;

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_each_failure_kind_emits_one_record() -> anyhow::Result<()> {
        let sink = MemorySink::new();
        let pipeline = QueryPipeline::new(ResponseValidator::default(), &sink);
        let schema = repo_overview_schema(DEFAULT_DISCRIMINANT);

        let bodies = [
            (serde_json::json!({}), ErrorKind::ParsingError, 404),
            (not_found_body(), ErrorKind::NotFoundError, 404),
            (owner_not_activated_body(), ErrorKind::OwnerNotActivatedError, 403),
        ];

        for (i, (body, kind, status)) in bodies.into_iter().enumerate() {
            let err = pipeline
                .run(&body, &schema, "useRepoOverview", None)?
                .unwrap_err();
            assert_eq!(err.error_kind, kind);
            assert_eq!(err.status_code, status);
            assert_eq!(sink.len(), i + 1);
        }

        Ok(())
    }

    #[test]
    fn test_typed_repository() -> anyhow::Result<()> {
        let sink = MemorySink::new();
        let pipeline = QueryPipeline::new(ResponseValidator::default(), &sink);

        let overview = pipeline
            .run_as::<OwnerQuery<RepoOverview>>(
                &repository_body(),
                &repo_overview_schema(DEFAULT_DISCRIMINANT),
                "useRepoOverview",
                None,
            )?
            .map_err(|e| anyhow::anyhow!(e.dev_message))?
            .into_repository()
            .ok_or_else(|| anyhow::anyhow!("expected repository arm"))?;

        assert_eq!(overview.default_branch.as_deref(), Some("main"));
        assert_eq!(overview.coverage_enabled, Some(true));
        assert!(sink.is_empty());
        Ok(())
    }
}

#[cfg(test)]
mod redirect_tests {
    use super::*;

    #[test]
    fn test_branch_switch_then_navigation() {
        let route = "critical-role/c3/tree/laudna/foo/bar";
        let mut tracker = RedirectTracker::new(route);

        let selection = RouteRefDescriptor::new(route, "chetney")
            .with_repo("critical-role", "c3")
            .with_branch("laudna");
        tracker.select_ref(&selection);
        assert_eq!(
            tracker.new_path(),
            compute_new_path(&selection).as_deref()
        );

        // Navigating elsewhere before the redirect fires drops it
        tracker.observe_route("critical-role/c3/pulls");
        assert_eq!(tracker.take_redirect(), None);

        // The old selection is stale for the new route
        tracker.select_ref(&selection);
        assert_eq!(tracker.new_path(), None);
    }
}
