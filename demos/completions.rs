use argle::{
    bash_completions, fish_completions, Action, App, ArgsConfig, Command, CompletionStyle, OptionConfig,
    Parsed,
};
use std::io;

const PROGRAM: &str = "completions";
const TRIGGER: &str = "--_complete";

const DESCRIPTION: &str = r#"
Demos completions and completion script generation.

To enable completions, source the output of {script bash} or {script fish}.
"#;

fn script(parsed: &mut Parsed<'_>) -> bool {
    if parsed.failed() {
        return false;
    }

    let mut stdout = io::stdout();
    let shell = parsed.args()[0].clone();
    let written = match shell.as_str() {
        "bash" => bash_completions(&mut stdout, PROGRAM, TRIGGER),
        "fish" => fish_completions(&mut stdout, PROGRAM, TRIGGER),
        shell => {
            parsed.error_message(format!("unsupported shell: '{shell}'"));
            return false;
        }
    };

    match written {
        Ok(()) => true,
        Err(error) => {
            parsed.error_message(error.to_string());
            false
        }
    }
}

fn whatever(parsed: &mut Parsed<'_>) -> bool {
    !parsed.failed()
}

fn main() {
    let app = App::builder()
        .description(DESCRIPTION)
        .command(
            Command::new("script")
                .headline("Print a completion script")
                .args(ArgsConfig::new(1).metavars(["SHELL"]))
                .runner(script),
        )
        .command(
            Command::new("whatever")
                .headline("This command does nothing")
                .option(OptionConfig::new('f', "flag").flag().headline("This is a flag"))
                .option(
                    OptionConfig::new('c', "colour")
                        .choices(["red", "green", "blue"])
                        .headline("Pick a colour"),
                )
                .runner(whatever),
        )
        .build();

    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    if argv.get(1).map(String::as_str) == Some(TRIGGER) {
        let cursor = std::cmp::max(argv.len() - 1, 2);
        if let Err(error) =
            app.write_completions(&mut io::stdout(), &argv, cursor, CompletionStyle::Annotated)
        {
            eprintln!("{error}");
            std::process::exit(1);
        }
        return;
    }

    let mut parsed = app.parse(&argv);

    match parsed.action() {
        Action::Proceed => {
            if parsed.run_command() == Some(false) {
                parsed.set_failed();
            }
        }
        Action::Help => eprint!("{}", parsed.help()),
        Action::Fatal => {}
    }

    for error in parsed.errors() {
        eprintln!("{error}");
    }

    std::process::exit(parsed.exit_code());
}
