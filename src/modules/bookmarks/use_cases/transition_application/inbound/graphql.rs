use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::bookmarks::use_cases::list_bookmarks::handler::BookmarkView;
use crate::modules::bookmarks::use_cases::list_bookmarks::inbound::graphql::GqlMutationOutcome;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct TransitionApplicationMutation;

#[Object]
impl TransitionApplicationMutation {
    async fn mark_as_completed(
        &self,
        context: &Context<'_>,
        job_id: String,
    ) -> GqlResult<GqlMutationOutcome> {
        let state = context.data_unchecked::<AppState>();
        let result = state.store.mark_as_completed(&job_id).await;
        Ok(GqlMutationOutcome::from_result(result, |job| {
            Some(BookmarkView::completed(job))
        }))
    }

    async fn move_to_active(
        &self,
        context: &Context<'_>,
        job_id: String,
    ) -> GqlResult<GqlMutationOutcome> {
        let state = context.data_unchecked::<AppState>();
        let now = state.store.now();
        let result = state.store.move_to_active(&job_id).await;
        Ok(GqlMutationOutcome::from_result(result, |job| {
            Some(BookmarkView::active(job, now))
        }))
    }

    async fn resume_pending_transition(
        &self,
        context: &Context<'_>,
    ) -> GqlResult<GqlMutationOutcome> {
        let state = context.data_unchecked::<AppState>();
        let now = state.store.now();
        let result = state.store.resume_pending_transition().await;
        Ok(GqlMutationOutcome::from_result(result, |job| {
            job.map(|job| match job.is_completed() {
                true => BookmarkView::completed(job),
                false => BookmarkView::active(job, now),
            })
        }))
    }
}
