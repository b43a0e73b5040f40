use iam_role_lister_lambda::adapters::iam_pages::role_page_from_output;
use iam_role_lister_lambda::adapters::role_source::RolePageSource;
use iam_role_lister_lambda::config::ListerConfig;
use iam_role_lister_lambda::handlers::list_roles::handle_list_roles_event;
use iam_role_lister_lambda::logging::init_logging;
use iam_role_lister_lambda::runtime::contract::{RolePage, RoleSummary};
use iam_role_lister_lambda::runtime::error::BoxError;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct IamRolePageSource {
    iam_client: aws_sdk_iam::Client,
    page_size: Option<i32>,
}

impl RolePageSource for IamRolePageSource {
    fn fetch_page(&self, marker: Option<&str>) -> Result<RolePage, BoxError> {
        let client = self.iam_client.clone();
        let marker = marker.map(str::to_string);
        let page_size = self.page_size;

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .list_roles()
                    .set_marker(marker)
                    .set_max_items(page_size)
                    .send()
                    .await
                    .map(|output| role_page_from_output(&output))
                    .map_err(BoxError::from)
            })
        })
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    source: &IamRolePageSource,
) -> Result<RoleSummary, Error> {
    handle_list_roles_event(event, source).map_err(|error| error.into_source())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = ListerConfig::from_env()?;
    init_logging(config.log_format);

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let source = IamRolePageSource {
        iam_client: aws_sdk_iam::Client::new(&aws_config),
        page_size: config.page_size,
    };
    let source = &source;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, source).await
    }))
    .await
}
