use argle::{Action, App, ArgsConfig, Command, OptionConfig, Parsed};

fn sum(parsed: &mut Parsed<'_>) -> bool {
    let mut total: i64 = 0;

    for item in parsed.args().to_vec() {
        match item.parse::<i64>() {
            Ok(value) => total += value,
            Err(_) => parsed.error_message(format!("'{item}' isn't an integer")),
        }
    }

    if parsed.failed() {
        return false;
    }

    if parsed.is_set("verbose") {
        println!("Summed {} item(s).", parsed.args().len());
    }

    println!("Sum: {total}");
    true
}

fn main() {
    let app = App::builder()
        .headline("Sum some {integers}")
        .command(
            Command::single()
                .option(
                    OptionConfig::new('v', "verbose")
                        .flag()
                        .headline("Report how many items were summed"),
                )
                .args(ArgsConfig::new(1).varadic().metavars(["ITEM"]))
                .runner(sum),
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
