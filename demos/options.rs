use argle::{Action, App, Command, ConsoleHandler, OptionConfig, Parsed};

const DESCRIPTION: &str = r#"
Each command demos a different kind of option.

Errors are printed as they happen, rather than collected.
"#;

fn freeform(parsed: &mut Parsed<'_>) -> bool {
    if parsed.failed() {
        return false;
    }

    match parsed.value("age").map(str::to_string) {
        Some(age) => match age.parse::<u8>() {
            Ok(age) => println!("You are {age}."),
            Err(_) => {
                parsed.error_message(format!("invalid age: '{age}'"));
                return false;
            }
        },
        None => println!("Age unknown."),
    }

    true
}

fn choices(parsed: &mut Parsed<'_>) -> bool {
    if parsed.failed() {
        return false;
    }

    println!("Hello, {}.", parsed.value("name").unwrap_or("stranger"));
    true
}

fn flags(parsed: &mut Parsed<'_>) -> bool {
    if parsed.failed() {
        return false;
    }

    for result in parsed.options() {
        if result.option().is_flag() {
            let name = result
                .option()
                .get_long()
                .map(str::to_string)
                .or_else(|| result.option().get_short().map(String::from))
                .unwrap_or_default();
            println!("{name}: {}", result.is_set());
        }
    }

    true
}

fn main() {
    let app = App::builder()
        .headline("Would you like an option?")
        .description(DESCRIPTION)
        .global_option(
            OptionConfig::new('g', "global")
                .flag()
                .headline("This is a global option"),
        )
        .command(
            Command::new("freeform")
                .headline("Any string value")
                .option(
                    OptionConfig::new('a', "age")
                        .metavar("AGE")
                        .headline("How old you are"),
                )
                .runner(freeform),
        )
        .command(
            Command::new("choices")
                .headline("A value picked from a list")
                .option(
                    OptionConfig::new('n', "name")
                        .choices(["zack", "garry", "ethel"])
                        .metavar("NAME")
                        .headline("Who you are"),
                )
                .runner(choices),
        )
        .command(
            Command::new("flags")
                .headline("Options without values, combinable as {-xy}")
                .option(OptionConfig::short('x').flag().headline("The x flag"))
                .option(OptionConfig::new('y', "why").flag().headline("The y flag"))
                .runner(flags),
        )
        .error_handler(ConsoleHandler::default())
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

    std::process::exit(parsed.exit_code());
}
