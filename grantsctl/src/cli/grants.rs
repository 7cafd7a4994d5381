use clap::{Args, Subcommand};
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use tracing::debug;

use client::ManagementClient;
use common::{Audience, ClientGrant, ClientGrantList, ClientId, ListParams};

use super::{Command, CommandError};

#[derive(Args, Debug)]
pub struct GrantsCommand {
    #[command(subcommand)]
    command: GrantsSubCommand,
}

#[derive(Subcommand, Debug)]
#[command(about = "Manage client grants")]
enum GrantsSubCommand {
    #[command(about = "List client grants")]
    List {
        #[arg(short, long, help = "Filter by API audience")]
        audience: Option<Audience>,
        #[arg(long, help = "Filter by client ID")]
        client_id: Option<ClientId>,
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Page number, zero based"
        )]
        page: Option<i64>,
        #[arg(long, allow_negative_numbers = true, help = "Entries per page")]
        per_page: Option<i64>,
        #[arg(long, help = "Ask the API for totals")]
        include_totals: bool,
        #[arg(short, long)]
        quiet: bool,
        #[arg(long, conflicts_with = "quiet")]
        json: bool,
    },
    #[command(about = "Grant scopes of an API to a client")]
    Create {
        #[arg(long, help = "Client receiving the grant")]
        client_id: ClientId,
        #[arg(short, long, help = "Audience of the API being granted")]
        audience: Audience,
        #[arg(
            short,
            long = "scope",
            help = "Scope to grant",
            long_help = "Scope to grant. Repeat the flag to grant several scopes"
        )]
        scope: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Replace the scopes of a client grant")]
    Update {
        id: String,
        #[arg(
            short,
            long = "scope",
            help = "Scope to keep",
            long_help = "Scope to keep. The given scopes replace the current ones; \
                         omit the flag to clear all scopes"
        )]
        scope: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Inspect client grant")]
    Inspect {
        id: String,
        #[arg(short, long, help = "Narrow the lookup to an API audience")]
        audience: Option<String>,
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Page to search, zero based",
            long_help = "Page to search, zero based. Only this page of the listing is searched"
        )]
        page: Option<i64>,
        #[arg(long, allow_negative_numbers = true, help = "Entries per page")]
        per_page: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Remove client grant")]
    Delete { id: String },
}

impl Command for GrantsCommand {
    fn execute(&self, client: &ManagementClient) -> Result<(), CommandError> {
        match &self.command {
            GrantsSubCommand::List {
                audience,
                client_id,
                page,
                per_page,
                include_totals,
                quiet,
                json,
            } => {
                let grants = client.client_grants();
                let list = match (audience, client_id, include_totals) {
                    (Some(audience), None, false) => {
                        grants.list_by_audience(audience.as_str(), *page, *per_page)?
                    }
                    (None, Some(client_id), false) => {
                        grants.list_by_client_id(client_id.as_str(), *page, *per_page)?
                    }
                    _ => {
                        let params =
                            list_params(audience.as_ref(), client_id.as_ref(), *include_totals);
                        grants.list_all(&params, *page, *per_page)?
                    }
                };
                if *json {
                    println!("{}", serde_json::to_string_pretty(&list)?);
                } else {
                    print_list(&list, *quiet);
                }
            }
            GrantsSubCommand::Create {
                client_id,
                audience,
                scope,
                json,
            } => {
                let grant =
                    client
                        .client_grants()
                        .create(client_id.as_str(), audience.as_str(), scope)?;
                debug!(id = %grant.id, "client grant created");
                print_grant(&grant, *json)?;
            }
            GrantsSubCommand::Update { id, scope, json } => {
                let grant = client.client_grants().update(id, scope)?;
                print_grant(&grant, *json)?;
            }
            GrantsSubCommand::Inspect {
                id,
                audience,
                page,
                per_page,
                json,
            } => {
                let grant = client
                    .client_grants()
                    .find(id, audience.as_deref(), *page, *per_page)?
                    .ok_or_else(|| {
                        let page = page.map_or(0, i64::unsigned_abs);
                        CommandError::Generic(format!("client grant {id} not found on page {page}"))
                    })?;
                print_grant(&grant, *json)?;
            }
            GrantsSubCommand::Delete { id } => {
                client.client_grants().delete(id)?;
                debug!(%id, "client grant deleted");
            }
        }
        Ok(())
    }
}

fn list_params(
    audience: Option<&Audience>,
    client_id: Option<&ClientId>,
    include_totals: bool,
) -> ListParams {
    let mut params = ListParams::new();
    params.audience = audience.cloned();
    params.client_id = client_id.cloned();
    if include_totals {
        params = params.include_totals(true);
    }
    params
}

fn print_grant(grant: &ClientGrant, json: bool) -> Result<(), CommandError> {
    if json {
        println!("{}", serde_json::to_string_pretty(grant)?);
    } else {
        println!("{}", grants_table(std::slice::from_ref(grant)));
    }
    Ok(())
}

fn print_list(list: &ClientGrantList, quiet: bool) {
    if quiet {
        for grant in list.grants() {
            println!("{}", grant.id);
        }
    } else {
        println!("{}", grants_table(list.grants()));
        if let Some(total) = list.total() {
            println!("Total: {total}");
        }
    }
}

fn grants_table(grants: &[ClientGrant]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Client ID", "Audience", "Scope"]);

    for grant in grants {
        table.add_row(vec![
            Cell::new(&grant.id),
            Cell::new(&grant.client_id),
            Cell::new(&grant.audience),
            Cell::new(grant.scope.join("\n")),
        ]);
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn grant(id: &str, scope: &[&str]) -> ClientGrant {
        ClientGrant {
            id: id.to_string(),
            client_id: ClientId::try_from("cid").unwrap(),
            audience: Audience::try_from("https://api.example.com/").unwrap(),
            scope: scope.iter().map(ToString::to_string).collect(),
            extra: serde_json::Map::new(),
        }
    }

    fn parse(args: &[&str]) -> GrantsSubCommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Grants(cmd)) => cmd.command,
            None => panic!("expected grants command"),
        }
    }

    #[test]
    fn test_grants_table_rows() {
        let table = grants_table(&[grant("cgr_1", &["read:x", "write:x"]), grant("cgr_2", &[])]);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("cgr_1"));
        assert!(rendered.contains("write:x"));
    }

    #[test]
    fn test_list_params_with_totals() {
        let params = list_params(Some(&Audience::try_from("aud").unwrap()), None, true);
        assert_eq!(
            params.to_query(),
            vec![
                ("audience", "aud".to_string()),
                ("include_totals", "true".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_list_negative_page() {
        let cmd = parse(&["grantsctl", "grants", "list", "--page", "-2", "--per-page", "10"]);
        let GrantsSubCommand::List { page, per_page, .. } = cmd else {
            panic!("expected list");
        };
        assert_eq!(page, Some(-2));
        assert_eq!(per_page, Some(10));
    }

    #[test]
    fn test_parse_inspect_page() {
        let cmd = parse(&[
            "grantsctl", "grants", "inspect", "cgr_1", "-a", "aud", "--page", "-3", "--per-page",
            "100",
        ]);
        let GrantsSubCommand::Inspect {
            id,
            audience,
            page,
            per_page,
            ..
        } = cmd
        else {
            panic!("expected inspect");
        };
        assert_eq!(id, "cgr_1");
        assert_eq!(audience.as_deref(), Some("aud"));
        assert_eq!(page, Some(-3));
        assert_eq!(per_page, Some(100));
    }

    #[test]
    fn test_parse_create_repeated_scope() {
        let cmd = parse(&[
            "grantsctl", "grants", "create", "--client-id", "cid", "-a", "aud", "-s", "read:x",
            "-s", "write:x",
        ]);
        let GrantsSubCommand::Create { client_id, scope, .. } = cmd else {
            panic!("expected create");
        };
        assert_eq!(client_id.as_str(), "cid");
        assert_eq!(scope, vec!["read:x", "write:x"]);
    }

    #[test]
    fn test_parse_create_rejects_empty_audience() {
        let result = Cli::try_parse_from([
            "grantsctl", "grants", "create", "--client-id", "cid", "--audience", "",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_update_without_scope_clears() {
        let cmd = parse(&["grantsctl", "grants", "update", "cgr_1"]);
        let GrantsSubCommand::Update { id, scope, .. } = cmd else {
            panic!("expected update");
        };
        assert_eq!(id, "cgr_1");
        assert!(scope.is_empty());
    }
}
