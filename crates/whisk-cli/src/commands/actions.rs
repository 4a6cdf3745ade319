//! Action subcommands

use crate::{
    cli::{ActionArgs, Cli, Commands},
    error::{CliError, CliResult},
    utils::{format_json, is_binary_artifact, parse_key_value, validate_file_exists, ColoredOutput},
};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info};
use whisk_client::{
    ActionLimits, ActionOptions, ActionSource, Actions, ClientConfig, TimeoutConfig, WhiskClient,
};

pub struct ActionCommand {
    config: ClientConfig,
    compact: bool,
}

impl ActionCommand {
    /// Environment configuration overlaid with command line flags
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let overlay = ClientConfig {
            api_host: cli.api_host.clone(),
            api_key: cli.api_key.clone(),
            namespace: cli.namespace.clone(),
            ignore_certs: cli.insecure,
            timeout: cli.timeout_ms.map(TimeoutConfig::with_total),
            ..Default::default()
        };

        Ok(Self {
            config: ClientConfig::from_env().merge(overlay),
            compact: cli.compact,
        })
    }

    pub async fn run(&self, command: Commands) -> CliResult<()> {
        match command {
            Commands::Create { args } | Commands::Update { args } if args.dry_run => {
                let options = build_action_options(&args)?;
                let body = Actions::action_body(&options)?.to_json()?;
                self.print(&body)
            }
            Commands::List { skip, limit, count } => {
                let options = ActionOptions {
                    skip,
                    limit,
                    count: count.then_some(true),
                    ..Default::default()
                };
                let listed = self.actions()?.list(&options).await?;
                self.print(&listed)
            }
            Commands::Get { name, code } => {
                let options = ActionOptions {
                    code,
                    ..ActionOptions::named(name)
                };
                let action = self.actions()?.get(&options).await?;
                self.print(&action)
            }
            Commands::Invoke {
                name,
                params,
                blocking,
                result,
            } => {
                let mut options = ActionOptions::named(name.clone())
                    .blocking(blocking || result)
                    .result_only(result);
                for raw in &params {
                    let (key, value) = parse_key_value(raw)?;
                    options = options.with_param(key, value);
                }

                debug!(action = %name, blocking = blocking || result, "invoking");
                let response = self.actions()?.invoke(&options).await?;
                self.print(&response)
            }
            Commands::Create { args } => {
                let options = build_action_options(&args)?;
                self.actions()?.create(&options).await?;
                info!("created action {}", args.name);
                println!("{} {}", ColoredOutput::success("ok:"), ColoredOutput::highlight(&args.name));
                Ok(())
            }
            Commands::Update { args } => {
                let options = build_action_options(&args)?;
                self.actions()?.update(&options).await?;
                info!("updated action {}", args.name);
                println!("{} {}", ColoredOutput::success("ok:"), ColoredOutput::highlight(&args.name));
                Ok(())
            }
            Commands::Delete { name } => {
                self.actions()?.delete(&ActionOptions::named(name.clone())).await?;
                println!("{} deleted {}", ColoredOutput::success("ok:"), ColoredOutput::highlight(&name));
                Ok(())
            }
        }
    }

    fn actions(&self) -> CliResult<Actions> {
        Ok(WhiskClient::new(self.config.clone())?.actions())
    }

    fn print(&self, value: &JsonValue) -> CliResult<()> {
        println!("{}", format_json(value, self.compact)?);
        Ok(())
    }
}

/// Translate create/update flags into action options
pub fn build_action_options(args: &ActionArgs) -> CliResult<ActionOptions> {
    let mut options = ActionOptions::named(args.name.clone());
    options.kind = args.kind.clone();
    options.version = args.action_version.clone();

    match (&args.artifact, &args.sequence) {
        (Some(path), None) => {
            validate_file_exists(path)?;
            let source = if is_binary_artifact(path) {
                ActionSource::Binary(std::fs::read(path)?)
            } else {
                ActionSource::Code(std::fs::read_to_string(path)?)
            };
            options.action = Some(source);
        }
        (None, Some(components)) => {
            options = options.with_sequence(components.iter().map(|c| c.trim().to_string()));
        }
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidArgument(
                "an artifact and --sequence cannot be combined".to_string(),
            ));
        }
        (None, None) => {}
    }

    if let Some(main) = &args.main {
        let mut exec = Map::new();
        exec.insert("main".to_string(), JsonValue::String(main.clone()));
        options.exec = Some(exec);
    }

    for raw in &args.params {
        let (key, value) = parse_key_value(raw)?;
        options = options.with_param(key, value);
    }
    for raw in &args.annotations {
        let (key, value) = parse_key_value(raw)?;
        options = options.with_annotation(key, value);
    }

    if args.timeout.is_some() || args.memory.is_some() || args.logsize.is_some() {
        options.limits = Some(ActionLimits {
            timeout: args.timeout,
            memory: args.memory,
            logs: args.logsize,
            ..Default::default()
        });
    }

    Ok(options)
}
