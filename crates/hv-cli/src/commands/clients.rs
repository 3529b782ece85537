//! Clients command: lists active or inactive clients.

use std::io::Write;

use anyhow::Result;
use hv_core::{Client, ClientId, HarvestAccessor, RecordMap, Reports};

use super::util::{require_success, write_json};

/// Writes one line per client under a counted header.
pub fn format_clients<W: Write>(
    writer: &mut W,
    label: &str,
    clients: &RecordMap<ClientId, Client>,
) -> Result<()> {
    writeln!(writer, "{label} clients ({})", clients.len())?;
    for client in clients.values() {
        writeln!(writer, "- {}  {}", client.id, client.name)?;
    }
    Ok(())
}

/// Runs the clients command.
pub fn run<A: HarvestAccessor, W: Write>(
    writer: &mut W,
    reports: &Reports<A>,
    inactive: bool,
    json: bool,
) -> Result<()> {
    let (label, response) = if inactive {
        ("Inactive", reports.inactive_clients()?)
    } else {
        ("Active", reports.active_clients()?)
    };
    let clients = require_success(response)?.unwrap_or_default();

    if json {
        write_json(writer, &clients)
    } else {
        format_clients(writer, label, &clients)
    }
}

#[cfg(test)]
mod tests {
    use hv_core::ApiResponse;

    use super::*;
    use crate::commands::fixtures::{FakeAccessor, client, render, reports};

    fn accessor() -> FakeAccessor {
        FakeAccessor {
            clients: Some(ApiResponse::ok(
                [
                    client(1, "Acme", true),
                    client(2, "Globex", false),
                    client(3, "Initech", true),
                ]
                .into_iter()
                .collect(),
            )),
            ..FakeAccessor::default()
        }
    }

    #[test]
    fn lists_active_clients() {
        let reports = reports(accessor());
        let output = render(|out| run(out, &reports, false, false));
        insta::assert_snapshot!(output, @r"
        Active clients (2)
        - 1  Acme
        - 3  Initech
        ");
    }

    #[test]
    fn lists_inactive_clients() {
        let reports = reports(accessor());
        let output = render(|out| run(out, &reports, true, false));
        insta::assert_snapshot!(output, @r"
        Inactive clients (1)
        - 2  Globex
        ");
    }

    #[test]
    fn json_output_is_keyed_by_id() {
        let reports = reports(accessor());
        let output = render(|out| run(out, &reports, false, true));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["1"]["name"], "Acme");
        assert_eq!(value["3"]["name"], "Initech");
        assert!(value.get("2").is_none());
    }

    #[test]
    fn failed_request_is_an_error() {
        let reports = reports(FakeAccessor {
            clients: Some(ApiResponse::status("401")),
            ..FakeAccessor::default()
        });
        let mut output = Vec::new();
        let err = run(&mut output, &reports, false, false).unwrap_err();
        assert_eq!(err.to_string(), "request failed with status 401");
        assert!(output.is_empty());
    }
}
