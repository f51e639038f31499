use argle::{Action, App, ArgsConfig, Command, Parsed};

const DESCRIPTION: &str = r#"
Each command takes a different arrangement of {positional} arguments.

Run {help} on a command to see its usage line.
"#;

fn fixed(parsed: &mut Parsed<'_>) -> bool {
    if parsed.failed() {
        return false;
    }

    let args = parsed.args();
    println!("From {} to {} via {}.", args[0], args[1], args[2]);
    true
}

fn varadic(parsed: &mut Parsed<'_>) -> bool {
    if parsed.failed() {
        return false;
    }

    let args = parsed.args();
    println!("First: {}", args[0]);
    println!("Rest: {:?}", &args[1..]);
    true
}

fn main() {
    let app = App::builder()
        .headline("Would you like some arguments?")
        .description(DESCRIPTION)
        .command(
            Command::new("fixed")
                .headline("Precisely three arguments")
                .args(ArgsConfig::new(3).metavars(["FROM", "TO", "VIA"]))
                .runner(fixed),
        )
        .command(
            Command::new("varadic")
                .headline("One argument, then as many as you like")
                .args(ArgsConfig::new(1).varadic().metavars(["FIRST", "REST"]))
                .runner(varadic),
        )
        .build();

    let mut parsed = app.parse_env();

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
