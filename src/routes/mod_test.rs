use super::*;
use crate::state::test_helpers;

#[tokio::test]
async fn healthz_returns_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[test]
fn app_builds_with_all_routes() {
    // Route conflicts panic at construction time.
    let _router = app(test_helpers::test_app_state());
}
