//! Nested schemas, manually handled fields and flag groups.

use anyhow::Result;
use arg_model::{
    ArgModel, ArgModelResult, ArgParser, FlagAction, FlagSpec, FlagSurface, ManualFields,
    ParsedArgs, PartialValues, ProgramInfo, Value, binder,
};
use rstest::rstest;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
struct Connection {
    user: String,
    #[arg_model(default = "puppy".into())]
    host: String,
}

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
struct Session {
    #[arg_model(nested)]
    connection: Connection,
    #[arg_model(default = 30)]
    timeout: u32,
    tags: Vec<String>,
}

#[rstest]
fn nested_flags_share_the_namespace() -> Result<()> {
    let session = Session::try_parse_from([
        "--user", "kitten", "--tags", "a", "--timeout", "5", "--tags", "b",
    ])?;
    assert_eq!(
        session,
        Session {
            connection: Connection {
                user: "kitten".into(),
                host: "puppy".into(),
            },
            timeout: 5,
            tags: vec!["a".into(), "b".into()],
        }
    );
    Ok(())
}

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
#[arg_model(custom_parser)]
struct Login {
    user: String,
    host: String,
}

impl ArgModel for Login {
    fn update_parser(surface: &mut dyn FlagSurface, mut manual: ManualFields) -> ArgModelResult<()> {
        surface.add_flag(FlagSpec::new("--my-user-flag").help("Put the username here :)"))?;
        manual.insert("user");
        binder::update_parser::<Self>(surface, &manual)
    }

    fn from_parsed_args(args: &ParsedArgs, mut partial: PartialValues) -> ArgModelResult<Self> {
        if let Some(user) = args.value("my_user_flag") {
            partial.insert("user", user);
        }
        binder::from_parsed_args::<Self>(args, partial)
    }
}

#[rstest]
fn manual_fields_use_their_own_flag() -> Result<()> {
    let login = Login::try_parse_from(["--my-user-flag", "puppy", "--host", "doggy"])?;
    assert_eq!(
        login,
        Login {
            user: "puppy".into(),
            host: "doggy".into(),
        }
    );
    assert!(Login::try_parse_from(["--user", "puppy", "--host", "doggy"]).is_err());
    Ok(())
}

#[rstest]
fn missing_manual_value_fails_validation() {
    let err = Login::try_parse_from(["--host", "doggy"]).expect_err("user was never supplied");
    assert!(matches!(
        err,
        arg_model::ArgModelError::Validation { schema: "Login", .. }
    ));
}

fn default_account_ids() -> Vec<String> {
    vec!["1".into(), "2".into(), "3".into()]
}

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
#[arg_model(custom_parser)]
struct Report {
    #[arg_model(default_factory = default_account_ids)]
    account_ids: Vec<String>,
    #[arg_model(default = false)]
    verbose: bool,
}

impl ArgModel for Report {
    fn update_parser(surface: &mut dyn FlagSurface, mut manual: ManualFields) -> ArgModelResult<()> {
        surface.add_flag(
            FlagSpec::new("--account-id")
                .dest("account_ids")
                .action(FlagAction::Append),
        )?;
        manual.insert("account_ids");
        binder::update_parser::<Self>(surface, &manual)
    }
}

#[rstest]
#[case::repeated(&["--account-id", "7", "--account-id", "9"], &["7", "9"])]
#[case::absent_uses_declared_factory(&["--verbose"], &["1", "2", "3"])]
#[case::no_flags(&[], &["1", "2", "3"])]
fn manual_flags_fall_back_to_declared_defaults(
    #[case] args: &[&str],
    #[case] expected: &[&str],
) -> Result<()> {
    let report = Report::try_parse_from(args.iter().copied())?;
    assert_eq!(report.account_ids, expected);
    Ok(())
}

#[rstest]
fn partial_values_override_nested_reconstruction() -> Result<()> {
    let mut parser = ArgParser::default();
    Session::update_parser(&mut parser, ManualFields::new())?;
    let parsed = parser.try_parse_from(["--user", "kitten", "--tags", "x"])?;
    let mut partial = PartialValues::new();
    partial.insert_serialized(
        "connection",
        &Connection {
            user: "override".into(),
            host: "elsewhere".into(),
        },
    )?;
    let session = Session::from_parsed_args(&parsed, partial)?;
    assert_eq!(session.connection.user, "override");
    assert_eq!(session.connection.host, "elsewhere");
    Ok(())
}

#[rstest]
fn schemas_register_on_flag_groups() -> Result<()> {
    let mut parser = ArgParser::new(ProgramInfo::new("session"));
    Connection::update_parser(&mut parser.group("Connection"), ManualFields::new())?;
    let help = parser.render_help();
    assert!(help.contains("Connection:"));
    assert!(help.contains("--host"));
    let parsed = parser.try_parse_from(["--user", "kitten"])?;
    assert_eq!(parsed.value("host"), Some(Value::from("puppy")));
    Ok(())
}

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
#[arg_model(custom_parser)]
struct Credentials {
    token: String,
    #[arg_model(default = "bearer".into())]
    scheme: String,
}

impl ArgModel for Credentials {
    fn update_parser(surface: &mut dyn FlagSurface, mut manual: ManualFields) -> ArgModelResult<()> {
        surface.add_flag(FlagSpec::new("--api-token").help("Token used to authenticate."))?;
        manual.insert("token");
        binder::update_parser::<Self>(surface, &manual)
    }

    fn from_parsed_args(args: &ParsedArgs, mut partial: PartialValues) -> ArgModelResult<Self> {
        if let Some(token) = args.value("api_token") {
            partial.insert("token", token);
        }
        binder::from_parsed_args::<Self>(args, partial)
    }
}

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
struct Deploy {
    #[arg_model(nested)]
    credentials: Credentials,
    target: String,
}

#[rstest]
fn nested_overrides_run_inside_derived_parents() -> Result<()> {
    let deploy = Deploy::try_parse_from(["--api-token", "abc", "--target", "prod"])?;
    assert_eq!(
        deploy,
        Deploy {
            credentials: Credentials {
                token: "abc".into(),
                scheme: "bearer".into(),
            },
            target: "prod".into(),
        }
    );
    assert!(Deploy::try_parse_from(["--token", "abc", "--target", "prod"]).is_err());
    Ok(())
}

#[rstest]
fn parent_manual_set_and_partial_values_stay_at_their_level() -> Result<()> {
    let mut parser = ArgParser::default();
    let manual: ManualFields = ["target", "scheme"].into_iter().collect();
    Deploy::update_parser(&mut parser, manual)?;
    let parsed = parser.try_parse_from(["--api-token", "abc", "--scheme", "basic"])?;
    assert!(parsed.destinations().all(|dest| dest != "target"));

    let mut partial = PartialValues::new();
    partial.insert("target", "staging").insert("scheme", "ignored");
    let deploy = Deploy::from_parsed_args(&parsed, partial)?;
    assert_eq!(deploy.target, "staging");
    assert_eq!(deploy.credentials.token, "abc");
    assert_eq!(deploy.credentials.scheme, "basic");
    Ok(())
}
