use http::Method;
use log::{debug, info};
use serde_json::json;

use crate::error::{Error, Result};
use crate::ghorg::Context;
use crate::github::{endpoint, Account, ApiRequest, Gateway, Transport};
use crate::projection::{check_status, project, ProjectionSpec};
use crate::utils::{is_email, snippet};

const INVITE_ROLE: &str = "direct_member";

/// Invite someone to the organisation, by email address or by GitHub login.
///
/// A login is first resolved to its numeric id with a user lookup. If the
/// invitation itself then fails, the lookup is not undone (there is nothing
/// to undo) and the failure is reported as-is.
///
/// See: https://docs.github.com/en/rest/orgs/members?apiVersion=2022-11-28#create-an-organization-invitation
pub async fn invite<T: Transport>(context: &Context, gateway: &Gateway<T>) -> Result<String> {
    let args = context.args()?;
    let target = args[0].as_str();
    let credentials = context.config.github()?;

    let body = if is_email(target) {
        debug!("Inviting {target} by email");
        json!({ "email": target, "role": INVITE_ROLE })
    } else {
        let account = get_user(context, gateway, target).await?;
        debug!("Inviting {} by id {}", account.login, account.id);
        json!({ "invitee_id": account.id, "role": INVITE_ROLE })
    };

    let url = endpoint(&credentials.api_url, &["orgs", credentials.org.as_str(), "invitations"]);
    let request = ApiRequest::github(&credentials, Method::POST, url).json(body);
    let response = gateway.send(request).await?;
    check_status(&response)?;
    info!("Invited {target} to {}", credentials.org);

    project(&response, ProjectionSpec::Full, context.verbose())
}

/// Look up a GitHub account by login
async fn get_user<T: Transport>(
    context: &Context,
    gateway: &Gateway<T>,
    login: &str,
) -> Result<Account> {
    let credentials = context.config.github()?;
    let url = endpoint(&credentials.api_url, &["users", login]);
    let response = gateway
        .send(ApiRequest::github(&credentials, Method::GET, url))
        .await?;
    check_status(&response)?;

    serde_json::from_slice(&response.body).map_err(|e| Error::Projection {
        status: response.status,
        reason: format!("could not read user {login}: {e}"),
        snippet: snippet(&response.body_text()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::ghorg::testing::context;
    use crate::github::testing::StubTransport;
    use serde_json::Value;

    fn body(request: &ApiRequest) -> &Value {
        request.body.as_ref().unwrap()
    }

    #[tokio::test]
    async fn test_invite_by_email_posts_once() {
        let stub = StubTransport::new().respond_json(201, json!({"id": 1, "email": "user@example.com"}));
        let gateway = Gateway::new(stub);

        invite(&context(Command::Invite, &["user@example.com"], false), &gateway)
            .await
            .unwrap();

        let requests = gateway.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.github.com/orgs/course-org/invitations"
        );
        assert_eq!(body(&requests[0])["email"], "user@example.com");
        assert_eq!(body(&requests[0])["role"], INVITE_ROLE);
        assert!(body(&requests[0]).get("invitee_id").is_none());
    }

    #[tokio::test]
    async fn test_invite_by_login_looks_up_id_first() {
        let stub = StubTransport::new()
            .respond_json(200, json!({"id": 42, "login": "some-login"}))
            .respond_json(201, json!({"id": 7, "login": "some-login"}));
        let gateway = Gateway::new(stub);

        let output = invite(&context(Command::Invite, &["some-login"], false), &gateway)
            .await
            .unwrap();
        assert!(output.contains("\"id\": 7"));

        let requests = gateway.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.github.com/users/some-login"
        );
        assert_eq!(requests[1].method, Method::POST);
        assert_eq!(body(&requests[1])["invitee_id"], 42);
        assert!(body(&requests[1]).get("email").is_none());
    }

    #[tokio::test]
    async fn test_unknown_login_stops_before_invitation() {
        let stub = StubTransport::new().respond(404, r#"{"message":"Not Found"}"#);
        let gateway = Gateway::new(stub);

        let result = invite(&context(Command::Invite, &["nobody"], false), &gateway).await;
        assert!(matches!(result, Err(Error::Api { .. })));
        assert_eq!(gateway.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_invitation_after_lookup_is_reported() {
        let stub = StubTransport::new()
            .respond_json(200, json!({"id": 42, "login": "some-login"}))
            .respond(422, r#"{"message":"Validation Failed"}"#);
        let gateway = Gateway::new(stub);

        let result = invite(&context(Command::Invite, &["some-login"], false), &gateway).await;
        match result {
            Err(Error::Api { status, snippet }) => {
                assert_eq!(status.as_u16(), 422);
                assert!(snippet.contains("Validation Failed"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
        assert_eq!(gateway.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_without_id_is_projection_error() {
        let stub = StubTransport::new().respond_json(200, json!({"login": "some-login"}));
        let gateway = Gateway::new(stub);

        let result = invite(&context(Command::Invite, &["some-login"], false), &gateway).await;
        assert!(matches!(result, Err(Error::Projection { .. })));
        assert_eq!(gateway.transport().requests().len(), 1);
    }
}
