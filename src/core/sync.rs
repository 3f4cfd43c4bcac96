use crate::core::allowlist::{CustomerConfig, Target};
use crate::core::client::Client;
use crate::core::errors::Result;
use crate::core::security_api::ConfigCheck;
use log::info;
use serde_json::Value;

/*-------------------------------------------------------------------------------------------------
  Sync Outcome
-------------------------------------------------------------------------------------------------*/

/// How a sync run ended. Only [Outcome::Updated] means the remote configuration changed.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The new group was submitted; holds the server's response.
    Updated(Value),

    /// Dry run; holds the configuration that would have been submitted.
    DryRun(CustomerConfig),

    /// A group with this alias already exists; nothing was written.
    AlreadyExists(String),

    /// The server returned no unresolved-IP list; nothing was written.
    NoResults,
}

/*-------------------------------------------------------------------------------------------------
  Progress
-------------------------------------------------------------------------------------------------*/

/// Steps reported while a sync runs, in order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Progress {
    /// About to read the current customer configuration.
    CheckingConfiguration,

    /// The configuration has unresolved IPs; about to look for this alias.
    CheckingAlias(String),

    /// About to submit the updated configuration.
    SettingConfiguration,
}

/*-------------------------------------------------------------------------------------------------
  Sync
-------------------------------------------------------------------------------------------------*/

/// Add the AWS IP prefixes for `target` to the security API's unresolved-IP allowlist, unless
/// a group for the target alias already exists.
///
/// ```no_run
/// use aws_service_cidr::{Client, Outcome, Target};
///
/// let client = Client::new()?;
/// match aws_service_cidr::sync(&client, &Target::new("S3", "us-east-1"), false, false)? {
///     Outcome::Updated(response) => println!("{response}"),
///     outcome => println!("{outcome:?}"),
/// }
/// # Ok::<(), aws_service_cidr::Error>(())
/// ```
pub fn sync(client: &Client, target: &Target, include_ipv6: bool, dry_run: bool) -> Result<Outcome> {
    sync_with_progress(client, target, include_ipv6, dry_run, |_| {})
}

/// [sync], calling `progress` as each step starts.
pub fn sync_with_progress<F>(
    client: &Client,
    target: &Target,
    include_ipv6: bool,
    dry_run: bool,
    mut progress: F,
) -> Result<Outcome>
where
    F: FnMut(Progress),
{
    let alias = target.alias();

    progress(Progress::CheckingConfiguration);
    let config = client.get_config()?;
    if config.unresolved_ips().is_some() {
        progress(Progress::CheckingAlias(alias.clone()));
    }

    let config = match ConfigCheck::new(config, &alias) {
        ConfigCheck::Ready(config) => config,
        ConfigCheck::AliasExists => return Ok(Outcome::AlreadyExists(alias)),
        ConfigCheck::NoResults => return Ok(Outcome::NoResults),
    };

    let group = client.fetch_cidrs(target, include_ipv6)?;

    if dry_run {
        info!("Dry run; skipping configuration update");
        return Ok(Outcome::DryRun(config.with_group(group)?));
    }

    progress(Progress::SettingConfiguration);
    client.write_config(config, group).map(Outcome::Updated)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::allowlist::AllowlistGroup;
    use crate::core::aws_ip_ranges::tests::{MINIMAL_IP_RANGES_JSON, TEST_IP_RANGES_JSON};
    use crate::core::client::ClientBuilder;
    use crate::core::errors::{log_error, Error};
    use mockito::{Matcher, Mock, ServerGuard};
    use serde_json::json;
    use test_log::test;

    const PATH: &str = "/api/v1/networkTopology/customerConfig";

    fn test_client(server: &ServerGuard) -> Client {
        ClientBuilder::default()
            .api_endpoint(&server.url())
            .api_token("tok")
            .aws_ip_ranges_url(&format!("{}/ip-ranges.json", server.url()))
            .build()
            .unwrap()
    }

    fn mock_ip_ranges(server: &mut ServerGuard) -> Mock {
        server
            .mock("GET", "/ip-ranges.json")
            .with_status(200)
            .with_body(TEST_IP_RANGES_JSON)
            .create()
    }

    fn mock_config(server: &mut ServerGuard, body: Value) -> Mock {
        server
            .mock("GET", PATH)
            .with_status(200)
            .with_body(body.to_string())
            .create()
    }

    #[test]
    fn test_sync_appends_new_group() {
        let mut server = mockito::Server::new();
        let current = json!({
            "unresolvedIPs": [
                {"ipsOrCIDRs": ["10.0.0.0/8"], "alias": "EC2-US-WEST-1", "allowedByDefault": true}
            ]
        });
        let _config = mock_config(&mut server, current.clone());
        let _feed = mock_ip_ranges(&mut server);
        let put = server
            .mock("PUT", PATH)
            .match_body(Matcher::Json(json!({
                "unresolvedIPs": [
                    {"ipsOrCIDRs": ["10.0.0.0/8"], "alias": "EC2-US-WEST-1", "allowedByDefault": true},
                    {"ipsOrCIDRs": ["3.5.0.0/16", "52.216.0.0/15"], "alias": "S3-US-EAST-1", "allowedByDefault": true}
                ]
            })))
            .with_status(200)
            .with_body(r#"{"status": "updated"}"#)
            .create();

        let outcome = sync(
            &test_client(&server),
            &Target::new("S3", "us-east-1"),
            false,
            false,
        )
        .inspect_err(log_error)
        .unwrap();

        put.assert();
        assert_eq!(outcome, Outcome::Updated(json!({"status": "updated"})));
    }

    #[test]
    fn test_sync_skips_write_when_alias_exists() {
        let mut server = mockito::Server::new();
        let _config = mock_config(
            &mut server,
            json!({
                "unresolvedIPs": [
                    {"ipsOrCIDRs": ["3.5.0.0/16"], "alias": "S3-US-EAST-1", "allowedByDefault": true}
                ]
            }),
        );
        let feed = server.mock("GET", "/ip-ranges.json").expect(0).create();
        let put = server.mock("PUT", PATH).expect(0).create();

        let outcome = sync(
            &test_client(&server),
            &Target::new("s3", "us-east-1"),
            false,
            false,
        )
        .unwrap();

        feed.assert();
        put.assert();
        assert_eq!(outcome, Outcome::AlreadyExists("S3-US-EAST-1".to_string()));
    }

    #[test]
    fn test_sync_skips_write_when_no_results() {
        let mut server = mockito::Server::new();
        let _config = mock_config(&mut server, json!({"clusters": []}));
        let put = server.mock("PUT", PATH).expect(0).create();

        let outcome = sync(
            &test_client(&server),
            &Target::new("S3", "us-east-1"),
            false,
            false,
        )
        .unwrap();

        put.assert();
        assert_eq!(outcome, Outcome::NoResults);
    }

    #[test]
    fn test_sync_dry_run() {
        let mut server = mockito::Server::new();
        let _config = mock_config(&mut server, json!({"unresolvedIPs": [], "version": 4}));
        let _feed = mock_ip_ranges(&mut server);
        let put = server.mock("PUT", PATH).expect(0).create();

        let outcome = sync(
            &test_client(&server),
            &Target::new("S3", "us-east-1"),
            true,
            true,
        )
        .unwrap();

        put.assert();
        let expected: CustomerConfig =
            serde_json::from_value(json!({"unresolvedIPs": [], "version": 4})).unwrap();
        let expected = expected
            .with_group(AllowlistGroup::new(
                &Target::new("S3", "us-east-1"),
                vec![
                    "3.5.0.0/16".to_string(),
                    "52.216.0.0/15".to_string(),
                    "2600:1fa0:80::/40".to_string(),
                ],
            ))
            .unwrap();
        assert_eq!(outcome, Outcome::DryRun(expected));
    }

    #[test]
    fn test_sync_feed_failure_leaves_config_untouched() {
        let mut server = mockito::Server::new();
        let _config = mock_config(&mut server, json!({"unresolvedIPs": []}));
        let _feed = server
            .mock("GET", "/ip-ranges.json")
            .with_status(500)
            .create();
        let put = server.mock("PUT", PATH).expect(0).create();

        let result = sync(
            &test_client(&server),
            &Target::new("S3", "us-east-1"),
            false,
            false,
        );

        put.assert();
        assert!(matches!(result, Err(Error::Fetch(_))));
    }

    #[test]
    fn test_sync_with_minimal_feed() {
        let mut server = mockito::Server::new();
        let _config = mock_config(
            &mut server,
            json!({"unresolvedIPs": [{"alias": "EC2-US-WEST-1"}]}),
        );
        let _feed = server
            .mock("GET", "/ip-ranges.json")
            .with_status(200)
            .with_body(MINIMAL_IP_RANGES_JSON)
            .create();
        let put = server
            .mock("PUT", PATH)
            .match_body(Matcher::Json(json!({
                "unresolvedIPs": [
                    {"alias": "EC2-US-WEST-1"},
                    {"ipsOrCIDRs": ["3.5.0.0/16"], "alias": "S3-US-EAST-1", "allowedByDefault": true}
                ]
            })))
            .with_status(200)
            .with_body("{}")
            .create();

        let outcome = sync(
            &test_client(&server),
            &Target::new("S3", "us-east-1"),
            false,
            false,
        )
        .inspect_err(log_error)
        .unwrap();

        put.assert();
        assert_eq!(outcome, Outcome::Updated(json!({})));
    }

    #[test]
    fn test_sync_reports_progress_in_order() {
        let mut server = mockito::Server::new();
        let _config = mock_config(&mut server, json!({"unresolvedIPs": []}));
        let _feed = mock_ip_ranges(&mut server);
        let _put = server
            .mock("PUT", PATH)
            .with_status(200)
            .with_body("{}")
            .create();

        let mut steps = Vec::new();
        sync_with_progress(
            &test_client(&server),
            &Target::new("S3", "us-east-1"),
            false,
            false,
            |step| steps.push(step),
        )
        .unwrap();

        assert_eq!(
            steps,
            vec![
                Progress::CheckingConfiguration,
                Progress::CheckingAlias("S3-US-EAST-1".to_string()),
                Progress::SettingConfiguration,
            ]
        );
    }

    #[test]
    fn test_sync_reports_no_alias_check_without_results() {
        let mut server = mockito::Server::new();
        let _config = mock_config(&mut server, json!({"unresolvedIPs": null}));

        let mut steps = Vec::new();
        let outcome = sync_with_progress(
            &test_client(&server),
            &Target::new("S3", "us-east-1"),
            false,
            false,
            |step| steps.push(step),
        )
        .unwrap();

        assert_eq!(outcome, Outcome::NoResults);
        assert_eq!(steps, vec![Progress::CheckingConfiguration]);
    }
}
