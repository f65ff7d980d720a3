use http::Method;

use crate::error::Result;
use crate::ghorg::Context;
use crate::github::{endpoint, ApiRequest, Gateway, Transport};
use crate::projection::{check_status, project, ProjectionSpec};

/// Show a user's membership of the organisation
///
/// See: https://docs.github.com/en/rest/orgs/members?apiVersion=2022-11-28#get-organization-membership-for-a-user
pub async fn membership<T: Transport>(context: &Context, gateway: &Gateway<T>) -> Result<String> {
    let args = context.args()?;
    let credentials = context.config.github()?;
    let url = endpoint(
        &credentials.api_url,
        &["orgs", credentials.org.as_str(), "memberships", args[0].as_str()],
    );

    let response = gateway
        .send(ApiRequest::github(&credentials, Method::GET, url))
        .await?;
    check_status(&response)?;
    project(&response, ProjectionSpec::Membership, context.verbose())
}
