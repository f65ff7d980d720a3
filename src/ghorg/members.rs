use http::Method;

use crate::error::Result;
use crate::ghorg::Context;
use crate::github::{endpoint, ApiRequest, Gateway, Transport};
use crate::projection::{check_status, project, ProjectionSpec};

const PER_PAGE: &str = "500";

/// List the members of the organisation, or of one of its teams. Only the
/// first page is fetched.
pub async fn members<T: Transport>(context: &Context, gateway: &Gateway<T>) -> Result<String> {
    let args = context.args()?;
    let credentials = context.config.github()?;
    let org = credentials.org.as_str();

    let mut url = match args.first() {
        Some(team) => endpoint(&credentials.api_url, &["orgs", org, "teams", team.as_str(), "members"]),
        None => endpoint(&credentials.api_url, &["orgs", org, "members"]),
    };
    url.query_pairs_mut()
        .append_pair("per_page", PER_PAGE)
        .append_pair("page", "1");

    let response = gateway
        .send(ApiRequest::github(&credentials, Method::GET, url))
        .await?;
    check_status(&response)?;
    project(&response, ProjectionSpec::Members, context.verbose())
}
