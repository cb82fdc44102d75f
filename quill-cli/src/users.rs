use clap::{App, Arg, ArgMatches, SubCommand};
use quill_models::{users::*, Connection};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("users")
        .about("Manage users")
        .subcommand(
            SubCommand::with_name("new")
                .arg(
                    Arg::with_name("name")
                        .short("n")
                        .long("name")
                        .alias("username")
                        .takes_value(true)
                        .help("The username of the new user"),
                )
                .arg(
                    Arg::with_name("display-name")
                        .short("N")
                        .long("display-name")
                        .takes_value(true)
                        .help("The display name of the new user"),
                )
                .arg(
                    Arg::with_name("summary")
                        .short("s")
                        .long("summary")
                        .alias("bio")
                        .takes_value(true)
                        .help("The summary of the new user"),
                )
                .arg(
                    Arg::with_name("email")
                        .short("e")
                        .long("email")
                        .takes_value(true)
                        .help("Email address of the new user"),
                )
                .arg(
                    Arg::with_name("password")
                        .short("p")
                        .long("password")
                        .takes_value(true)
                        .help("The password of the new user"),
                )
                .about("Create a new user on this instance"),
        )
        .subcommand(SubCommand::with_name("list").about("List all users"))
        .subcommand(
            SubCommand::with_name("reset-password")
                .arg(
                    Arg::with_name("name")
                        .short("n")
                        .long("name")
                        .alias("username")
                        .takes_value(true)
                        .help("The username of the user to reset the password of"),
                )
                .about("Reset a user's password"),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .arg(
                    Arg::with_name("name")
                        .short("n")
                        .long("name")
                        .alias("username")
                        .takes_value(true)
                        .help("The username of the user to delete"),
                )
                .about("Permanently delete a user and everything they wrote"),
        )
}

pub fn run<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    match args.subcommand() {
        ("new", Some(x)) => new(x, conn),
        ("list", Some(_)) => list(conn),
        ("reset-password", Some(x)) => reset_password(x, conn),
        ("delete", Some(x)) => delete(x, conn),
        ("", None) => command().print_help().unwrap(),
        _ => println!("Unknown subcommand"),
    }
}

fn new<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let username = args
        .value_of("name")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Username"));
    let display_name = args.value_of("display-name").unwrap_or("").to_string();
    let summary = args.value_of("summary").unwrap_or("");
    let email = args.value_of("email").map(String::from);
    let password = args.value_of("password").map(String::from).unwrap_or_else(|| {
        rpassword::prompt_password("Password: ").expect("Couldn't read the password")
    });

    NewUser::new_local(conn, username, display_name, summary, email, &password)
        .expect("Couldn't save new user");
}

fn list(conn: &Connection) {
    let users = User::list(conn).expect("Couldn't list users");
    for user in users {
        println!(
            "{}\t{}\t{}",
            user.id,
            user.username,
            user.email.unwrap_or_default()
        );
    }
}

fn reset_password<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let username = args
        .value_of("name")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Username"));
    let user = User::find_by_username(conn, &username).expect("Couldn't find user");
    let password =
        rpassword::prompt_password("New password: ").expect("Couldn't read the password");
    user.reset_password(conn, &password)
        .expect("Couldn't reset password");
}

fn delete<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let username = args
        .value_of("name")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Username"));
    let user = User::find_by_username(conn, &username).expect("Couldn't find user");
    let confirmation = super::ask_for(&format!(
        "Type \"{}\" again to confirm the deletion",
        user.username
    ));
    if confirmation == user.username {
        user.delete(conn).expect("Couldn't delete user");
        println!("{} is gone", username);
    } else {
        println!("Aborted");
    }
}
