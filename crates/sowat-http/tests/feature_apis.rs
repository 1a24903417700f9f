//! Typed admin endpoints: paths, query strings and bodies.

mod common;

use serde_json::json;
use sowat_core::ResourceId;
use sowat_core::model::{
    DashboardPeriod, PlanListParams, SortOrder, StripeSyncStatus, SuspendAction, SuspendUser,
    UpdatePlan, UpdateQuotas, UpdateRights, UserListParams, UserStatus, WhitelistListParams,
};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{Harness, user_page};

fn id(raw: &str) -> ResourceId {
    ResourceId::new(raw).unwrap()
}

fn plan_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "pro",
        "display_name": "Pro",
        "articles_limit": 50,
        "social_posts_limit": 100,
        "stories_limit": 20,
        "monthly_price": "29.00",
        "yearly_price": "290.00",
        "is_active": true,
        "stripe_sync_status": "synced"
    })
}

fn action(message: &str) -> serde_json::Value {
    json!({"success": true, "message": message, "userId": "u-42"})
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_users_list_sends_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "2"))
        .and(query_param("status", "suspended"))
        .and(query_param("sortOrder", "DESC"))
        .and(query_param_is_missing("email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_page()))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let params = UserListParams {
        page: Some(2),
        status: Some(UserStatus::Suspended),
        sort_order: Some(SortOrder::Desc),
        ..Default::default()
    };
    let page = harness.client.users().list(&params).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.total_pages, 1);
}

#[tokio::test]
async fn test_user_actions_hit_their_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/admin/users/u-42/rights"))
        .and(body_json(json!({"isAdmin": true, "reason": "ops lead"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(action("rights updated")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/admin/users/u-42/quotas"))
        .and(body_json(json!({"extraArticles": 10, "extraSocialPosts": 0, "extraStories": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(action("quotas updated")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/admin/users/u-42/suspend"))
        .and(body_json(json!({"action": "suspend", "reason": "chargeback", "notifyUser": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(action("suspended")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/users/u-42/reset-password"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(action("email sent")))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let users = harness.client.users();
    let user = id("u-42");

    let rights = users
        .update_rights(
            &user,
            &UpdateRights {
                is_admin: true,
                reason: Some("ops lead".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(rights.message, "rights updated");
    assert_eq!(rights.user_id.as_deref(), Some("u-42"));

    users
        .update_quotas(
            &user,
            &UpdateQuotas {
                extra_articles: 10,
                extra_social_posts: 0,
                extra_stories: 5,
                reason: None,
            },
        )
        .await
        .unwrap();

    users
        .suspend(
            &user,
            &SuspendUser {
                action: SuspendAction::Suspend,
                reason: "chargeback".into(),
                end_date: None,
                notify_user: Some(true),
            },
        )
        .await
        .unwrap();

    users
        .reset_password(&user, &Default::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_user_consumption_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users/u-42/consumption-history"))
        .and(query_param("limit", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"month": "2024-05", "articles": 4, "social_posts": 10, "stories": 1, "total": 15},
                {"month": "2024-06", "articles": 6, "social_posts": 12, "stories": 0, "total": 18, "trend": 20.0}
            ]
        })))
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let params = sowat_core::model::ConsumptionHistoryParams {
        limit: Some(6),
        ..Default::default()
    };
    let history = harness
        .client
        .users()
        .consumption_history(&id("u-42"), &params)
        .await
        .unwrap();

    assert_eq!(history.data.len(), 2);
    assert_eq!(history.data[1].trend, Some(20.0));
}

// ============================================================================
// Plans
// ============================================================================

#[tokio::test]
async fn test_plans_crud() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/plans"))
        .and(query_param("is_active", "true"))
        .and(query_param("stripe_sync_status", "outdated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [plan_json("p-1")],
            "meta": {"page": 1, "limit": 20, "total": 1, "pages": 1}
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/admin/plans/p-1"))
        .and(body_json(json!({"trial_days": 14})))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan_json("p-1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/admin/plans/p-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let plans = harness.client.plans();

    let page = plans
        .list(&PlanListParams {
            is_active: Some(true),
            stripe_sync_status: Some(StripeSyncStatus::Outdated),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.meta.total_pages, 1);
    assert_eq!(page.data[0].monthly_price, "29.00");

    plans
        .update(
            &id("p-1"),
            &UpdatePlan {
                trial_days: Some(14),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let deleted = plans.delete(&id("p-1")).await.unwrap();
    assert_eq!(deleted.success, Some(true));
}

#[tokio::test]
async fn test_plan_sync_sends_dry_run_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/plans/actions/sync"))
        .and(query_param("dryRun", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "timestamp": "2024-06-01T12:00:00Z",
            "results": {"plans": [], "credits": [], "summary": {"total": 3, "synced": 2, "skipped": 1, "failed": 0}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let report = harness.client.plans().sync_all(true).await.unwrap();

    assert!(report.success);
    assert_eq!(report.results.unwrap().summary.synced, 2);
}

// ============================================================================
// Whitelist
// ============================================================================

#[tokio::test]
async fn test_whitelist_list_and_migrate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/whitelist"))
        .and(query_param("confirmed", "true"))
        .and(query_param("migrated", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "w-1",
                "email": "early@bird.io",
                "source": "landing",
                "isConfirmed": true,
                "createdAt": "2024-01-10T08:00:00Z"
            }],
            "meta": {"page": 1, "limit": 20, "total": 1, "totalPages": 1}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/whitelist/w-1/migrate"))
        .and(body_json(json!({"reason": "beta wave 2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "migrated",
            "whitelistId": "w-1",
            "userId": "u-99"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/whitelist/migrate-batch"))
        .and(body_json(json!({"whitelistIds": ["w-2", "w-3"], "reason": "beta wave 2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalProcessed": 2,
            "successful": 1,
            "failed": 1,
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let whitelist = harness.client.whitelist();

    let page = whitelist
        .list(&WhitelistListParams {
            confirmed: Some(true),
            migrated: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!page.data[0].is_migrated());

    let outcome = whitelist.migrate(&id("w-1"), "beta wave 2").await.unwrap();
    assert_eq!(outcome.user_id.as_deref(), Some("u-99"));

    let batch = whitelist
        .migrate_batch(&[id("w-2"), id("w-3")], "beta wave 2")
        .await
        .unwrap();
    assert_eq!(batch.failed, 1);
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_period_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/dashboard/users-metrics"))
        .and(query_param("period", "7d"))
        .and(query_param_is_missing("compare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activeUsers": 12,
            "newUsers": 3,
            "totalUsers": 140,
            "proUsers": 20,
            "conversionRate": 14.3,
            "charts": {"userGrowth": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "error", "title": "Failed jobs", "message": "4 jobs failed", "link": "/admin/jobs"}
        ])))
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let dashboard = harness.client.dashboard();

    let metrics = dashboard
        .users_metrics(DashboardPeriod::SevenDays)
        .await
        .unwrap();
    assert_eq!(metrics.total_users, 140);

    let alerts = dashboard.alerts().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].link.as_deref(), Some("/admin/jobs"));
}

#[tokio::test]
async fn test_dashboard_overview_sends_compare() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/dashboard/overview"))
        .and(query_param("period", "30d"))
        .and(query_param("compare", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "period": "30d",
            "compare": true,
            "metrics": {
                "users": {"activeToday": 1, "active7d": 2, "active30d": 3, "newUsers": 1},
                "financial": {"mrr": 100.0, "mrrGrowth": 0.0, "arpu": 10.0, "churnRate": 0.0},
                "usage": {"articles": 5, "socialPosts": 2, "quotaUsage": 10.0},
                "system": {"jobs": {"waiting": 0, "failed": 0, "active": 0}, "avgGenerationTime": 3.5}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("acc", Some("ref"));
    let overview = harness
        .client
        .dashboard()
        .overview(DashboardPeriod::default(), true)
        .await
        .unwrap();

    assert!(overview.compare);
    assert_eq!(overview.metrics.users.active30d, 3);
}
