use clap::{Arg, ArgAction, Command, value_parser};

mod explorer;

pub use explorer::*;

fn name_arg(help: &'static str) -> Arg {
    Arg::new("name")
        .required(true)
        .help(help)
}

fn append_subcommands(command: Command) -> Command {
    command
        .subcommand(Command::new("ls")
            .about("lists the current location")
        )
        .subcommand(Command::new("pwd")
            .about("prints the current navigable path")
        )
        .subcommand(Command::new("cd")
            .about("enters a folder or the trash; \"..\" goes up")
            .arg(name_arg("folder name, \"trash\", or \"..\""))
        )
        .subcommand(Command::new("mkdir")
            .about("creates \"new folder\" under the current location")
        )
        .subcommand(Command::new("rename")
            .about("renames an item or folder, prompting for the new name")
            .arg(name_arg("name of the entity to rename"))
        )
        .subcommand(Command::new("rm")
            .about("moves an item or folder to the drive's trash")
            .arg(name_arg("name of the entity to trash"))
        )
        .subcommand(Command::new("cut")
            .about("marks an item or regular folder for a move")
            .arg(name_arg("name of the entity to cut"))
        )
        .subcommand(Command::new("borrow")
            .about("marks an item for a borrow; pasting links it elsewhere")
            .arg(name_arg("name of the item to borrow"))
        )
        .subcommand(Command::new("paste")
            .about("pastes the pending cut into the current location")
        )
        .subcommand(Command::new("purge")
            .about("permanently clears the drive's trash")
        )
        .subcommand(Command::new("refresh")
            .about("re-issues the current listing")
        )
        .subcommand(Command::new("download")
            .about("downloads an item's raw content into the working directory")
            .arg(name_arg("name of the item to download"))
        )
        .subcommand(Command::new("upload")
            .about("publishes a locally created asset to the remote network")
            .arg(name_arg("name of the item to upload"))
        )
        .subcommand(Command::new("menu")
            .about("resolves the context menu of a node")
            .arg(name_arg("name of the node, or \"trash\""))
            .arg(Arg::new("run")
                .long("run")
                .help("executes the named menu action instead of printing the menu")
            )
        )
}

pub fn cli() -> Command {
    let command = Command::new("ras-cli")
        .arg(Arg::new("host")
            .long("host")
            .default_value("localhost")
            .help("hostname of the asset store gateway")
        )
        .arg(Arg::new("port")
            .long("port")
            .default_value("80")
            .value_parser(value_parser!(u16))
            .help("port of the asset store gateway")
        )
        .arg(Arg::new("secure")
            .long("secure")
            .action(ArgAction::SetTrue)
            .help("sets the connection to use https")
        )
        .arg(Arg::new("group")
            .long("group")
            .default_value("private")
            .help("access group whose default drive the shell opens")
        )
        .arg(Arg::new("local")
            .long("local")
            .action(ArgAction::SetTrue)
            .help("marks the gateway as a locally running environment")
        );

    append_subcommands(command)
}

pub fn interactive() -> Command {
    let command = Command::new("")
        .subcommand_required(true)
        .no_binary_name(true)
        .subcommand(Command::new("quit")
            .alias("q")
            .about("exits program")
        );

    append_subcommands(command)
}
