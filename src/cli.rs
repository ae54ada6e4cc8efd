// Command line interface: `serve` the redirect service or `expand` one template

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::template::{Template, Variables};

pub const DEFAULT_PORT: u16 = 8000;

pub fn command() -> Command {
    Command::new("uritemplate")
        .about("Expand RFC 6570 URI templates")
        .subcommand_required(true)
        .subcommand(
            Command::new("serve")
                .about("Serve redirects for a catalog of named templates")
                .arg(
                    Arg::new("templates")
                        .short('t')
                        .long("templates")
                        .value_name("TEMPLATES")
                        .help("Path to a YAML file containing templates"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Port to listen on")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("8000"),
                ),
        )
        .subcommand(
            Command::new("expand")
                .about("Expand a template and print the result")
                .arg(
                    Arg::new("template")
                        .value_name("TEMPLATE")
                        .help("RFC 6570 template text")
                        .required(true),
                )
                .arg(
                    Arg::new("var")
                        .short('v')
                        .long("var")
                        .value_name("NAME=VALUE")
                        .help("Bind a variable; repeat a name to build a list")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("json")
                        .short('j')
                        .long("json")
                        .value_name("JSON_FILE")
                        .help("Path to a JSON object of variables"),
                )
                .arg(
                    Arg::new("url")
                        .long("url")
                        .help("Fail unless the expansion is a valid absolute URL")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Splits `name=value`; the value may itself contain `=`
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("Expected NAME=VALUE but got '{}'", assignment),
    }
}

/// Collects variables from `--json` first, then every `--var` in order
pub fn collect_variables(matches: &ArgMatches) -> Result<Variables> {
    let mut variables = match matches.get_one::<String>("json") {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read variables file '{}'", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid variables in '{}'", path))?
        }
        None => Variables::new(),
    };

    for assignment in matches.get_many::<String>("var").into_iter().flatten() {
        let (name, value) = parse_assignment(assignment)?;
        variables.append_text(name, value);
    }

    Ok(variables)
}

/// Runs the `expand` subcommand and returns the text to print
pub fn run_expand(matches: &ArgMatches) -> Result<String> {
    let source = matches
        .get_one::<String>("template")
        .context("TEMPLATE is required")?;
    let template = Template::parse(source)?;
    let variables = collect_variables(matches)?;

    if matches.get_flag("url") {
        Ok(template.try_make_url(&variables)?.to_string())
    } else {
        Ok(template.expand(&variables))
    }
}
