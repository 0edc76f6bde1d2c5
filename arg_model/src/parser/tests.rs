//! Unit tests for flag registration and value lookup.

use anyhow::Result;
use clap::{Arg, Command, error::ErrorKind};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::Converter;

#[fixture]
fn parser() -> ArgParser {
    ArgParser::new(ProgramInfo::new("test"))
}

#[rstest]
fn absent_flags_fall_back_to_defaults(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--host").default_value(json!("puppy")))?;
    parser.add_flag(FlagSpec::new("--force").converter(Converter::Toggle))?;
    parser.add_flag(FlagSpec::new("--note"))?;
    let parsed = parser.try_parse_from(Vec::<String>::new())?;
    assert_eq!(parsed.value("host"), Some(json!("puppy")));
    assert_eq!(parsed.value("force"), Some(json!(false)));
    assert_eq!(parsed.value("note"), None);
    assert_eq!(parsed.value("never_registered"), None);
    assert!(!parsed.is_present("host"));
    Ok(())
}

#[rstest]
fn supplied_values_are_converted(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--port").converter(Converter::of::<u16>()))?;
    parser.add_flag(FlagSpec::new("--force").converter(Converter::Toggle))?;
    let parsed = parser.try_parse_from(["--port", "8080", "--force"])?;
    assert_eq!(parsed.value("port"), Some(json!(8080)));
    assert_eq!(parsed.value("force"), Some(json!(true)));
    assert!(parsed.is_present("port"));
    Ok(())
}

#[rstest]
fn append_flags_collect_in_order(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(
        FlagSpec::new("--account-id")
            .dest("account_ids")
            .action(FlagAction::Append)
            .converter(Converter::of::<u32>()),
    )?;
    let parsed = parser.try_parse_from(["--account-id", "7", "--account-id", "3"])?;
    assert_eq!(parsed.value("account_ids"), Some(json!([7, 3])));
    assert_eq!(parsed.destinations().collect::<Vec<_>>(), ["account_ids"]);
    Ok(())
}

#[rstest]
fn rejected_conversion_is_a_user_error(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--port").converter(Converter::of::<u16>()))?;
    let err = parser
        .try_parse_from(["--port", "eighty"])
        .expect_err("port must be numeric");
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    Ok(())
}

#[rstest]
fn missing_required_flags_are_reported(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--user").required(true))?;
    parser.add_flag(FlagSpec::new("--host").required(true))?;
    let err = parser
        .try_parse_from(Vec::<String>::new())
        .expect_err("both flags are required");
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    let rendered = err.to_string();
    assert!(rendered.contains("--user"));
    assert!(rendered.contains("--host"));
    Ok(())
}

#[rstest]
fn required_toggles_stay_optional(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--force").converter(Converter::Toggle).required(true))?;
    let parsed = parser.try_parse_from(Vec::<String>::new())?;
    assert_eq!(parsed.value("force"), Some(json!(false)));
    Ok(())
}

#[rstest]
#[case::same_token(FlagSpec::new("--host"), FlagSpec::new("--host").dest("other"))]
#[case::same_dest(FlagSpec::new("--host"), FlagSpec::new("--server").dest("host"))]
fn duplicate_registrations_conflict(
    mut parser: ArgParser,
    #[case] first: FlagSpec,
    #[case] second: FlagSpec,
) -> Result<()> {
    parser.add_flag(first)?;
    let err = parser.add_flag(second).expect_err("second flag collides");
    assert!(matches!(err, ArgModelError::FlagConflict { .. }));
    Ok(())
}

#[rstest]
fn help_is_reserved(mut parser: ArgParser) {
    let err = parser
        .add_flag(FlagSpec::new("--help"))
        .expect_err("clap owns --help");
    assert!(matches!(err, ArgModelError::FlagConflict { .. }));
}

#[test]
fn predefined_arguments_are_respected() {
    let command = Command::new("test").arg(Arg::new("verbose").long("verbose"));
    let mut parser = ArgParser::from_command(command);
    let err = parser
        .add_flag(FlagSpec::new("--verbose").dest("loud"))
        .expect_err("--verbose already exists");
    assert!(matches!(err, ArgModelError::FlagConflict { .. }));
}

#[rstest]
#[case::missing_prefix("host")]
#[case::short("-h")]
#[case::empty("--")]
#[case::triple_dash("---host")]
#[case::whitespace("--my host")]
fn malformed_tokens_are_rejected(mut parser: ArgParser, #[case] token: &str) {
    let err = parser
        .add_flag(FlagSpec::new(token).dest("x"))
        .expect_err("token is malformed");
    assert!(matches!(err, ArgModelError::InvalidFlag { .. }));
}

#[rstest]
fn groups_render_under_their_heading(mut parser: ArgParser) -> Result<()> {
    parser
        .group("Connection")
        .add_flag(FlagSpec::new("--host").help("The host to connect to."))?;
    let help = parser.render_help();
    assert!(help.contains("Connection:"));
    assert!(help.contains("The host to connect to."));
    Ok(())
}

#[rstest]
fn help_request_is_a_display_error(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--host"))?;
    let err = parser
        .try_parse_from(["--help"])
        .expect_err("help is reported as an error");
    assert!(crate::is_display_request(&err));
    Ok(())
}

#[test]
fn staged_duplicates_are_rejected_on_staging() -> Result<()> {
    let mut staged = StagedFlags::new();
    staged.add_flag(FlagSpec::new("--host"))?;
    staged.add_flag(FlagSpec::new("--port"))?;
    let err = staged
        .add_flag(FlagSpec::new("--server").dest("host"))
        .expect_err("destination already staged");
    assert!(matches!(err, ArgModelError::FlagConflict { .. }));
    assert_eq!(staged.len(), 2);
    let tokens: Vec<_> = staged.iter().map(FlagSpec::token).collect();
    assert_eq!(tokens, ["--host", "--port"]);
    Ok(())
}

#[rstest]
fn commit_checks_every_flag_before_adding_any(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--port"))?;
    let mut staged = StagedFlags::new();
    staged.add_flag(FlagSpec::new("--host"))?;
    staged.add_flag(FlagSpec::new("--port").dest("other_port"))?;
    let err = staged.commit(&mut parser).expect_err("--port already exists");
    assert!(matches!(err, ArgModelError::FlagConflict { .. }));
    let parsed = parser.try_parse_from(Vec::<String>::new())?;
    assert_eq!(parsed.destinations().collect::<Vec<_>>(), ["port"]);
    Ok(())
}

#[rstest]
fn group_check_mirrors_its_parser(mut parser: ArgParser) -> Result<()> {
    parser.add_flag(FlagSpec::new("--host"))?;
    let group = parser.group("Extra");
    assert!(group.check(&FlagSpec::new("--host").dest("elsewhere")).is_err());
    assert!(group.check(&FlagSpec::new("--port")).is_ok());
    Ok(())
}
