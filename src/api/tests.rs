//! Tests for the endpoint helpers

use super::*;
use crate::auth::Credential;
use crate::client::FeishuClient;
use crate::config::AppConfig;
use crate::error::Error;
use crate::types::UserIdType;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> FeishuClient {
    let client = FeishuClient::new(AppConfig::new("cli_test", "secret").with_host(server.uri()))
        .unwrap();
    client
        .http()
        .credentials()
        .replace(Credential::new("t-tenant"))
        .await;
    client
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": "success", "data": data}))
}

fn api_error(code: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": code, "msg": "denied"}))
}

fn ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("ou_{i}")).collect()
}

// ============================================================================
// Contact and department
// ============================================================================

#[tokio::test]
async fn test_user_info_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/contact/v3/users/u_1"))
        .and(query_param("user_id_type", "user_id"))
        .and(header("authorization", "Bearer t-tenant"))
        .respond_with(ok(json!({"user": {
            "union_id": "on_1",
            "open_id": "ou_1",
            "user_id": "u_1",
            "name": "Alice",
            "department_ids": ["od_1", "od_2"]
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let user = client
        .user_info_by_id("u_1", UserIdType::UserId)
        .await
        .unwrap();

    assert_eq!(user.name, "Alice");
    assert_eq!(user.open_id, "ou_1");
    assert_eq!(user.department_ids, vec!["od_1", "od_2"]);
}

#[tokio::test]
async fn test_user_info_by_name_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/search/v1/user"))
        .and(query_param("query", "Bob"))
        .respond_with(ok(json!({"users": [
            {"name": "Bob", "open_id": "ou_b1"},
            {"name": "Bob", "open_id": "ou_b2"}
        ]})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let user = client.user_info_by_name("Bob").await.unwrap().unwrap();
    assert_eq!(user.open_id, "ou_b1");
}

#[tokio::test]
async fn test_user_info_by_name_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/search/v1/user"))
        .respond_with(ok(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.user_info_by_name("Nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_department_info_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/contact/v3/departments/od_1"))
        .respond_with(ok(json!({"department": {
            "name": "Engineering",
            "chat_id": "oc_eng",
            "member_count": 42
        }})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let department = client.department_info_by_id("od_1").await.unwrap();
    assert_eq!(
        department,
        DepartmentInfo {
            name: "Engineering".to_string(),
            group_id: "oc_eng".to_string(),
            member_count: 42,
        }
    );
}

// ============================================================================
// Employees
// ============================================================================

#[tokio::test]
async fn test_employee_get_all_info_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/ehr/v1/employees"))
        .and(query_param("page_size", "100"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ok(json!({
            "items": [{"user_id": "u_1", "system_fields": {
                "name": "Alice", "department_id": "od_1", "employee_type": 1, "status": 2
            }}],
            "has_more": true,
            "page_token": "next"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/open-apis/ehr/v1/employees"))
        .and(query_param("page_token", "next"))
        .respond_with(ok(json!({
            "items": [{"user_id": "u_2", "system_fields": {
                "name": "Bob", "employee_type": 2, "status": 5
            }}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let employees = client
        .employee_get_all_info(UserIdType::UserId)
        .await
        .unwrap();

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].id, "u_1");
    assert_eq!(employees[0].employee_type, EmployeeType::FullTime);
    assert_eq!(employees[0].status, EmployeeStatus::AtJob);
    assert_eq!(employees[1].department_id, "");
    assert_eq!(employees[1].employee_type, EmployeeType::Internship);
    assert_eq!(employees[1].status, EmployeeStatus::Left);
}

#[tokio::test]
async fn test_employee_unknown_status_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/ehr/v1/employees"))
        .respond_with(ok(json!({
            "items": [{"user_id": "u_1", "system_fields": {
                "name": "Alice", "employee_type": 1, "status": 9
            }}],
            "has_more": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .employee_get_all_info(UserIdType::OpenId)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
}

// ============================================================================
// Groups
// ============================================================================

#[tokio::test]
async fn test_group_get_all_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .and(query_param("page_size", "100"))
        .respond_with(ok(json!({
            "items": [
                {"chat_id": "oc_1", "name": "ops", "tenant_key": "tk"},
                {"chat_id": "oc_2", "name": "dev", "tenant_key": "tk"}
            ],
            "has_more": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let groups = client.group_get_all_info().await.unwrap();
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["ops", "dev"]);
}

#[tokio::test]
async fn test_group_get_info_fills_chat_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats/oc_9"))
        .respond_with(ok(json!({"name": "release", "tenant_key": "tk"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let group = client.group_get_info("oc_9").await.unwrap();
    assert_eq!(
        group,
        GroupInfo {
            chat_id: "oc_9".to_string(),
            name: "release".to_string(),
            tenant_key: "tk".to_string(),
        }
    );
}

#[tokio::test]
async fn test_group_get_members_sends_id_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats/oc_1/members"))
        .and(query_param("member_id_type", "union_id"))
        .respond_with(ok(json!({
            "items": [{"member_id": "on_1", "name": "Alice"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let members = client
        .group_get_members("oc_1", UserIdType::UnionId)
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].member_id, "on_1");
}

#[tokio::test]
async fn test_group_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/im/v1/chats"))
        .and(query_param("user_id_type", "open_id"))
        .and(body_json(json!({"name": "new", "owner_id": "ou_owner"})))
        .respond_with(ok(json!({"chat_id": "oc_new", "name": "new", "tenant_key": "tk"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let group = client
        .group_create("new", UserIdType::OpenId, "ou_owner")
        .await
        .unwrap();
    assert_eq!(group.chat_id, "oc_new");
}

#[tokio::test]
async fn test_group_add_members_batches_of_fifty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/im/v1/chats/oc_1/members"))
        .and(query_param("member_id_type", "open_id"))
        .and(query_param("succeed_type", "1"))
        .respond_with(ok(json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .group_add_members("oc_1", UserIdType::OpenId, SucceedType::AddAvailable, &ids(120))
        .await
        .unwrap();

    let sizes: Vec<usize> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["id_list"].as_array().unwrap().len()
        })
        .collect();
    assert_eq!(sizes, vec![MEMBER_BATCH_SIZE, MEMBER_BATCH_SIZE, 20]);
}

#[tokio::test]
async fn test_group_add_members_empty_list_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .group_add_members("oc_1", UserIdType::OpenId, SucceedType::Default, &[])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_group_delete_members_attempts_every_batch() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/open-apis/im/v1/chats/oc_1/members"))
        .respond_with(api_error(232_011))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/open-apis/im/v1/chats/oc_1/members"))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .group_delete_members("oc_1", UserIdType::OpenId, &ids(60))
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(232_011));
}

#[tokio::test]
async fn test_group_change_owner() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/open-apis/im/v1/chats/oc_1"))
        .and(query_param("user_id_type", "user_id"))
        .and(body_json(json!({"owner_id": "u_2"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .group_change_owner("oc_1", UserIdType::UserId, "u_2")
        .await
        .unwrap();
}

// ============================================================================
// Messages
// ============================================================================

#[test]
fn test_message_content_encoding() {
    let text = MessageContent::Text("hi \"there\"".to_string());
    assert_eq!(text.msg_type(), "text");
    assert_eq!(text.encode().unwrap(), r#"{"text":"hi \"there\""}"#);

    let card = MessageContent::Interactive(json!({"elements": []}));
    assert_eq!(card.msg_type(), "interactive");
    assert_eq!(card.encode().unwrap(), r#"{"elements":[]}"#);
}

#[test]
fn test_receiver_id_type_parse() {
    assert_eq!("chat_id".parse::<ReceiverIdType>().unwrap(), ReceiverIdType::ChatId);
    assert_eq!("email".parse::<ReceiverIdType>().unwrap().as_str(), "email");
    assert!("phone".parse::<ReceiverIdType>().is_err());
}

#[tokio::test]
async fn test_message_send_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/im/v1/messages"))
        .and(query_param("receive_id_type", "chat_id"))
        .and(body_json(json!({
            "receive_id": "oc_1",
            "content": "{\"text\":\"deploy done\"}",
            "msg_type": "text"
        })))
        .respond_with(ok(json!({"message_id": "om_1", "chat_id": "oc_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let id = client
        .message_send(
            ReceiverIdType::ChatId,
            "oc_1",
            &MessageContent::Text("deploy done".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(id, "om_1");
}

#[tokio::test]
async fn test_message_send_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/im/v1/messages"))
        .respond_with(api_error(230_002))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .message_send(
            ReceiverIdType::OpenId,
            "ou_1",
            &MessageContent::Text("hi".to_string()),
        )
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(230_002));
}

#[tokio::test]
async fn test_message_update_uses_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/open-apis/im/v1/messages/om_1"))
        .and(body_json(json!({"content": "{\"elements\":[]}"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .message_update("om_1", "{\"elements\":[]}")
        .await
        .unwrap();
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/mina/v2/tokenLoginValidate"))
        .and(body_json(json!({"code": "c-1"})))
        .respond_with(ok(json!({"open_id": "ou_1", "employee_id": "e_1"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let session = client.login_session("c-1").await.unwrap();
    assert_eq!(
        session,
        LoginSession {
            open_id: "ou_1".to_string(),
            employee_id: "e_1".to_string(),
        }
    );
}

#[tokio::test]
async fn test_user_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/authen/v1/access_token"))
        .and(body_json(json!({"grant_type": "authorization_code", "code": "c-2"})))
        .respond_with(ok(json!({
            "access_token": "u-secret",
            "name": "Alice",
            "refresh_token": "ur-secret",
            "open_id": "ou_1",
            "expires_in": 6900
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let token = client.user_access_token("c-2").await.unwrap();
    assert_eq!(token.access_token, "u-secret");
    assert_eq!(token.user_id, "");
    assert_eq!(token.expires_in, 6900);

    let debug = format!("{token:?}");
    assert!(!debug.contains("u-secret"));
    assert!(!debug.contains("ur-secret"));
}

// ============================================================================
// Knowledge spaces
// ============================================================================

#[tokio::test]
async fn test_knowledge_space_create_uses_user_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/wiki/v2/spaces"))
        .and(header("authorization", "Bearer u-user"))
        .and(body_json(json!({"name": "Docs", "description": "team docs"})))
        .respond_with(ok(json!({"space": {
            "space_id": "sp_1", "name": "Docs", "description": "team docs"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let space = client
        .knowledge_space_create("Docs", "team docs", "u-user")
        .await
        .unwrap();
    assert_eq!(space.space_id, "sp_1");
}

#[tokio::test]
async fn test_knowledge_space_add_members_one_call_each() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/wiki/v2/spaces/sp_1/members"))
        .respond_with(ok(json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .knowledge_space_add_members("sp_1", "userid", &ids(3))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[2].body).unwrap();
    assert_eq!(
        body,
        json!({"member_type": "userid", "member_role": "member", "member_id": "ou_2"})
    );
}

#[tokio::test]
async fn test_knowledge_space_get_all_nodes_with_parent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/wiki/v2/spaces/sp_1/nodes"))
        .and(query_param("page_size", "10"))
        .and(query_param("parent_node_token", "wik_root"))
        .respond_with(ok(json!({
            "items": [{"node_token": "wik_a", "title": "A", "has_child": true}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let nodes = client
        .knowledge_space_get_all_nodes("sp_1", Some("wik_root"))
        .await
        .unwrap();
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].has_child);
}

#[tokio::test]
async fn test_knowledge_space_get_node_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/wiki/v2/spaces/get_node"))
        .and(query_param("token", "wik_a"))
        .respond_with(ok(json!({"node": {
            "node_token": "wik_a",
            "obj_token": "doc_1",
            "obj_type": "docx",
            "parent_node_token": "",
            "title": "A",
            "has_child": false
        }})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let node = client.knowledge_space_get_node_info("wik_a").await.unwrap();
    assert_eq!(node.obj_type, "docx");
    assert_eq!(node.obj_token, "doc_1");
}

#[tokio::test]
async fn test_knowledge_space_add_bots_as_admin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/wiki/v2/spaces/sp_1/members"))
        .and(header("authorization", "Bearer u-admin"))
        .respond_with(ok(json!({"member": {}})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .knowledge_space_add_bots_as_admin("sp_1", &ids(2), "u-admin")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(
        body,
        json!({"member_type": "openid", "member_role": "admin", "member_id": "ou_1"})
    );
}

#[tokio::test]
async fn test_knowledge_space_add_bots_reports_first_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/wiki/v2/spaces/sp_1/members"))
        .respond_with(api_error(131_006))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .knowledge_space_add_bots_as_admin("sp_1", &ids(3), "u-admin")
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(131_006));
}

#[tokio::test]
async fn test_knowledge_space_copy_node() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/wiki/v2/spaces/sp_1/nodes/wik_a/copy"))
        .and(body_json(json!({
            "target_parent_token": "wik_root",
            "target_space_id": "sp_2",
            "title": "Copy of A"
        })))
        .respond_with(ok(json!({"node": {
            "node_token": "wik_b",
            "parent_node_token": "wik_root",
            "title": "Copy of A"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let node = client
        .knowledge_space_copy_node("sp_1", "wik_a", "sp_2", "wik_root", Some("Copy of A"))
        .await
        .unwrap();
    assert_eq!(node.node_token, "wik_b");
    assert_eq!(node.parent_node_token, "wik_root");
}

#[tokio::test]
async fn test_knowledge_space_copy_node_keeps_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/wiki/v2/spaces/sp_1/nodes/wik_a/copy"))
        .and(body_json(json!({
            "target_parent_token": "",
            "target_space_id": "sp_1"
        })))
        .respond_with(ok(json!({"node": {"node_token": "wik_c"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let node = client
        .knowledge_space_copy_node("sp_1", "wik_a", "sp_1", "", None)
        .await
        .unwrap();
    assert_eq!(node.node_token, "wik_c");
}

// ============================================================================
// Path encoding
// ============================================================================

#[tokio::test]
async fn test_ids_are_percent_encoded_in_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats/oc%2F1%3Fx%3D1"))
        .respond_with(ok(json!({"name": "Escaped"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let group = client.group_get_info("oc/1?x=1").await.unwrap();
    assert_eq!(group.name, "Escaped");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[test]
fn test_encode_segment() {
    use crate::http::encode_segment;

    assert_eq!(encode_segment("oc_1-a.b~c"), "oc_1-a.b~c");
    assert_eq!(encode_segment("a/b"), "a%2Fb");
    assert_eq!(encode_segment("a b#c"), "a%20b%23c");
    assert_eq!(encode_segment("../x"), "..%2Fx");
}

// ============================================================================
// Approval
// ============================================================================

#[tokio::test]
async fn test_approval_instance_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/approval/v4/instances/INST-1"))
        .respond_with(ok(json!({
            "status": "APPROVED",
            "start_time": "1700000000000",
            "end_time": "1700000360000",
            "department_id": "od_1",
            "timeline": [
                {"type": "START", "open_id": "ou_1"},
                {"type": "PASS", "open_id": "ou_2"}
            ],
            "form": "[{\"id\":\"widget1\",\"type\":\"input\",\"value\":\"3 days\"}]"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let instance = client.approval_instance_by_id("INST-1").await.unwrap();

    assert_eq!(instance.status, "APPROVED");
    assert_eq!(instance.start_time.unwrap().timestamp(), 1_700_000_000);
    assert_eq!(instance.end_time.unwrap().timestamp(), 1_700_000_360);
    assert_eq!(instance.department_id, "od_1");
    assert_eq!(instance.timeline.len(), 2);
    assert_eq!(instance.timeline[1].node_type, "PASS");
    assert_eq!(instance.form[0]["value"], "3 days");
}

#[tokio::test]
async fn test_approval_pending_has_no_end_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/approval/v4/instances/INST-2"))
        .respond_with(ok(json!({
            "status": "PENDING",
            "start_time": "1700000000000",
            "end_time": "0",
            "form": "[]"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let instance = client.approval_instance_by_id("INST-2").await.unwrap();
    assert!(instance.end_time.is_none());
    assert!(instance.timeline.is_empty());
    assert!(instance.form.is_empty());
}

#[tokio::test]
async fn test_approval_bad_timestamp_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/approval/v4/instances/INST-3"))
        .respond_with(ok(json!({"status": "PENDING", "start_time": "yesterday"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.approval_instance_by_id("INST-3").await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Calendars
// ============================================================================

#[tokio::test]
async fn test_calendar_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/calendar/v4/calendars"))
        .and(body_json(json!({
            "summary": "On-call",
            "description": "Rotation",
            "permissions": "show_only_free_busy"
        })))
        .respond_with(ok(json!({"calendar": {
            "calendar_id": "cal_1",
            "summary": "On-call",
            "description": "Rotation",
            "permissions": "show_only_free_busy"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let calendar = client
        .calendar_create(
            &CalendarCreateRequest::new("On-call")
                .description("Rotation")
                .permissions(CalendarPermission::ShowOnlyFreeBusy),
        )
        .await
        .unwrap();
    assert_eq!(calendar.calendar_id, "cal_1");
    assert_eq!(calendar.permissions, CalendarPermission::ShowOnlyFreeBusy);
}

#[tokio::test]
async fn test_calendar_subscribe_uses_user_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/calendar/v4/calendars/cal_1/subscribe"))
        .and(header("authorization", "Bearer u-user"))
        .respond_with(ok(json!({"calendar": {"calendar_id": "cal_1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.calendar_subscribe("cal_1", "u-user").await.unwrap();
}

#[tokio::test]
async fn test_calendar_event_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/calendar/v4/calendars/cal_1/events"))
        .respond_with(ok(json!({"event": {
            "event_id": "ev_1",
            "organizer_calendar_id": "cal_1",
            "summary": "Standup",
            "start_time": {"timestamp": "1700000000"},
            "end_time": {"timestamp": "1700001800"},
            "reminders": [{"minutes": 5}]
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let start = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let end = chrono::DateTime::from_timestamp(1_700_001_800, 0).unwrap();
    let client = client_for(&server).await;
    let event = client
        .calendar_event_create("cal_1", &CalendarEventRequest::new("Standup", start, end))
        .await
        .unwrap();

    assert_eq!(event.event_id, "ev_1");
    assert_eq!(event.start_time.timestamp, "1700000000");
    assert_eq!(event.reminders, vec![Reminder { minutes: 5 }]);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["vchat"], json!({"vc_type": "vc"}));
    assert_eq!(body["end_time"], json!({"timestamp": "1700001800"}));
}

#[tokio::test]
async fn test_calendar_event_list_pages_from_anchor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/calendar/v4/calendars/cal_1/events"))
        .and(query_param("anchor_time", "1700000000"))
        .and(query_param("page_size", "100"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ok(json!({
            "items": [{"event_id": "ev_1"}],
            "has_more": true,
            "page_token": "e2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/open-apis/calendar/v4/calendars/cal_1/events"))
        .and(query_param("anchor_time", "1700000000"))
        .and(query_param("page_token", "e2"))
        .respond_with(ok(json!({"items": [{"event_id": "ev_2"}], "has_more": false})))
        .expect(1)
        .mount(&server)
        .await;

    let anchor = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let client = client_for(&server).await;
    let events = client
        .calendar_event_list_from("cal_1", anchor)
        .await
        .unwrap();
    let ids: Vec<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
    assert_eq!(ids, vec!["ev_1", "ev_2"]);
}

#[tokio::test]
async fn test_calendar_event_attendee_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/calendar/v4/calendars/cal_1/events/ev_1/attendees"))
        .and(query_param("user_id_type", "user_id"))
        .and(body_json(json!({
            "attendees": [
                {"type": "user", "user_id": "u_1"},
                {"type": "resource", "room_id": "omm_1"}
            ],
            "need_notification": false
        })))
        .respond_with(ok(json!({"attendees": [
            {"type": "user", "attendee_id": "at_1", "user_id": "u_1", "rsvp_status": "needs_action"},
            {"type": "resource", "attendee_id": "at_2", "room_id": "omm_1", "rsvp_status": "accept"}
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let attendees = client
        .calendar_event_attendee_create(
            "cal_1",
            "ev_1",
            UserIdType::UserId,
            &[
                CalendarEventAttendee::user("u_1"),
                CalendarEventAttendee::resource("omm_1"),
            ],
            false,
        )
        .await
        .unwrap();

    assert_eq!(attendees.len(), 2);
    assert_eq!(attendees[0].rsvp_status, Some(RsvpStatus::NeedsAction));
    assert_eq!(attendees[1].attendee_type, Some(AttendeeType::Resource));
}

#[tokio::test]
async fn test_calendar_event_attendee_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/calendar/v4/calendars/cal_1/events/ev_1/attendees"))
        .and(query_param("user_id_type", "open_id"))
        .and(query_param("page_size", "100"))
        .respond_with(ok(json!({
            "items": [{"type": "third_party", "third_party_email": "guest@example.com"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let attendees = client
        .calendar_event_attendee_query("cal_1", "ev_1", UserIdType::OpenId)
        .await
        .unwrap();
    assert_eq!(attendees[0].third_party_email, "guest@example.com");
}

// ============================================================================
// Documents and bitables
// ============================================================================

#[tokio::test]
async fn test_document_get_all_bitables_filters_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/docx/v1/documents/doc_1/blocks"))
        .and(query_param("page_size", "100"))
        .respond_with(ok(json!({
            "items": [
                {"block_id": "blk_1", "block_type": 2, "text": {}},
                {"block_id": "blk_2", "block_type": 18, "bitable": {"token": "bas_app_tbl1"}},
                {"block_id": "blk_3", "block_type": 18, "bitable": {"token": "bas2_tbl9"}}
            ],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let bitables = client.document_get_all_bitables("doc_1").await.unwrap();
    assert_eq!(
        bitables,
        vec![
            BitableInfo {
                block_id: "blk_2".to_string(),
                app_token: "bas".to_string()
            },
            BitableInfo {
                block_id: "blk_3".to_string(),
                app_token: "bas2".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_bitable_tables_and_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/bitable/v1/apps/app_1/tables"))
        .respond_with(ok(json!({
            "items": [{"table_id": "tbl_1", "name": "Tasks", "revision": 3}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/open-apis/bitable/v1/apps/app_1/tables/tbl_1/records"))
        .and(query_param("page_size", "100"))
        .respond_with(ok(json!({
            "items": [{"record_id": "rec_1", "fields": {"Title": "Ship it", "Done": true}}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let tables = client.bitable_get_all_tables("app_1").await.unwrap();
    assert_eq!(tables[0].name, "Tasks");

    let records = client
        .bitable_get_all_records("app_1", &tables[0].table_id)
        .await
        .unwrap();
    assert_eq!(records[0].record_id, "rec_1");
    assert_eq!(records[0].fields["Done"], json!(true));
}

// ============================================================================
// Robot and statistics
// ============================================================================

#[tokio::test]
async fn test_robot_get_info_reads_root_bot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/bot/v3/info"))
        .and(header("authorization", "Bearer t-tenant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "ok",
            "bot": {"app_name": "Notifier", "open_id": "ou_bot", "activate_status": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let bot = client.robot_get_info().await.unwrap();
    assert_eq!(bot.app_name, "Notifier");
    assert_eq!(bot.open_id, "ou_bot");
    assert_eq!(bot.activate_status, 2);
}

#[tokio::test]
async fn test_robot_get_info_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/bot/v3/info"))
        .respond_with(api_error(99_991_663))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.robot_get_info().await.unwrap_err();
    assert_eq!(err.api_code(), Some(99_991_663));
}

#[tokio::test]
async fn test_statistics_get_all_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/drive/v1/files/doc_1/statistics"))
        .and(query_param("file_type", "docx"))
        .respond_with(ok(json!({
            "file_token": "doc_1",
            "file_type": "docx",
            "statistics": {"uv": 10, "pv": 25, "like_count": -1, "timestamp": 1_700_000_000}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let stats = client.statistics_get_all_info("doc_1", "docx").await.unwrap();
    assert_eq!(
        stats,
        FileStatistics {
            uv: 10,
            pv: 25,
            like_count: -1,
            timestamp: 1_700_000_000
        }
    );
}

// ============================================================================
// Video meetings
// ============================================================================

#[tokio::test]
async fn test_vc_reserve_with_topic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/vc/v1/reserves/apply"))
        .and(body_json(json!({
            "end_time": "1700003600",
            "meeting_settings": {"topic": "Retro", "auto_record": false}
        })))
        .respond_with(ok(json!({"reserve": {
            "id": "rsv_1",
            "meeting_no": "112000358",
            "url": "https://vc.feishu.cn/j/112000358"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let end = chrono::DateTime::from_timestamp(1_700_003_600, 0).unwrap();
    let client = client_for(&server).await;
    let reservation = client.vc_reserve_with_topic("Retro", end).await.unwrap();
    assert_eq!(reservation.id, "rsv_1");
    assert_eq!(reservation.meeting_no, "112000358");
}

#[tokio::test]
async fn test_vc_reserve_inline_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/vc/v1/reserves/apply"))
        .respond_with(ok(json!({
            "id": "rsv_2",
            "meeting_no": "112000359",
            "url": "https://vc.feishu.cn/j/112000359"
        })))
        .mount(&server)
        .await;

    let end = chrono::DateTime::from_timestamp(1_700_003_600, 0).unwrap();
    let request = VcReserveRequest::new(end)
        .owner_id("ou_1")
        .auto_record(true);
    let client = client_for(&server).await;
    let reservation = client.vc_reserve(&request).await.unwrap();
    assert_eq!(reservation.url, "https://vc.feishu.cn/j/112000359");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["owner_id"], "ou_1");
    assert_eq!(body["meeting_settings"], json!({"auto_record": true}));
}

#[tokio::test]
async fn test_vc_query_participant_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-apis/vc/v1/participant_list"))
        .and(query_param("meeting_start_time", "1700000000"))
        .and(query_param("meeting_end_time", "1700003600"))
        .and(query_param("meeting_no", "112000358"))
        .and(query_param("page_size", "100"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ok(json!({
            "participants": [{
                "participant_name": "Alice",
                "user_id": "u_1",
                "audio": true,
                "use_rtc_proxy": false,
                "time_in_meeting": "30min"
            }],
            "has_more": true,
            "page_token": "pp2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/open-apis/vc/v1/participant_list"))
        .and(query_param("page_token", "pp2"))
        .respond_with(ok(json!({
            "participants": [{"participant_name": "Bob", "user_id": "u_2"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let participants = client
        .vc_query_participant_list(1_700_000_000, 1_700_003_600, "112000358")
        .await
        .unwrap();

    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].participant_name, "Alice");
    assert!(participants[0].audio);
    assert_eq!(participants[1].user_id, "u_2");
}

// ============================================================================
// Message cards
// ============================================================================

#[tokio::test]
async fn test_send_card_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/open-apis/im/v1/messages"))
        .and(query_param("receive_id_type", "chat_id"))
        .respond_with(ok(json!({"message_id": "om_card"})))
        .expect(1)
        .mount(&server)
        .await;

    let content = MessageCard::new()
        .header(CardHeader::new("Build").template(HeaderTemplate::Red))
        .element(Markdown::new("**failed** on `main`"))
        .into_content()
        .unwrap();

    let client = client_for(&server).await;
    let id = client
        .message_send(ReceiverIdType::ChatId, "oc_1", &content)
        .await
        .unwrap();
    assert_eq!(id, "om_card");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["msg_type"], "interactive");
    let card: Value = serde_json::from_str(body["content"].as_str().unwrap()).unwrap();
    assert_eq!(card["header"]["template"], "red");
    assert_eq!(card["elements"][0]["tag"], "markdown");
}
