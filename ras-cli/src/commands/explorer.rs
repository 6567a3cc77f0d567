use clap::ArgMatches;

use ras::nodes::{ExplorerNode, FolderNode, StatusKind, TrashNode};
use ras::resolve_actions;

use crate::error::{self, Context};
use crate::session::Session;

pub async fn ls(session: &Session) -> error::Result {
    let listing = session.listing().await?;

    for folder in listing.folders {
        let node = FolderNode::new(folder);
        let marker = if node.is_regular() { "" } else { "  (reserved)" };

        println!("d  {:<24} {}{}", node.name, node.folder_id, marker);
    }

    for item in listing.items {
        let node = session.state.get_item_data(&item);
        let wrapped = ExplorerNode::from(node.clone());
        let cut = if wrapped.status().contains(StatusKind::Cut, wrapped.id()) {
            "  (cut)"
        } else {
            ""
        };
        let borrowed = if node.borrowed { "@" } else { " " };

        println!("{}  {:<24} {} [{}]{}", borrowed, node.name, node.asset_id, node.kind, cut);
    }

    Ok(())
}

pub fn pwd(session: &Session) -> error::Result {
    use ras::collab::nav::Navigator;

    println!("{}", session.router.current_path());

    Ok(())
}

pub async fn cd(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();

    if name == ".." {
        session.leave();

        return Ok(());
    }

    let node = session.find(name).await?;

    match &node {
        ExplorerNode::Folder(_) | ExplorerNode::Trash(_) => {
            session.enter(node);

            Ok(())
        },
        _ => Err(error::Error::from(format!("\"{}\" is not a folder", name)))
    }
}

pub async fn mkdir(session: &Session) -> error::Result {
    session.state.new_folder(&session.current()).await?;

    Ok(())
}

pub async fn rename(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();
    let node = session.find(name).await?;

    session.state.rename(&node).await?;

    Ok(())
}

pub async fn rm(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();
    let node = session.find(name).await?;

    session.state.delete_item_or_folder(&node).await?;

    Ok(())
}

pub async fn cut(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();
    let node = session.find(name).await?;

    session.state.cut_item(&node)?;

    println!("cut {}", node.name());

    Ok(())
}

pub async fn borrow(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();
    let node = session.find(name).await?;
    let item = node.as_item()
        .context("only items can be borrowed")?;

    session.state.borrow_item(item)?;

    println!("borrowing {}", item.name);

    Ok(())
}

pub async fn paste(session: &Session) -> error::Result {
    if !session.state.has_pending_cut() {
        return Err(error::Error::from("nothing to paste"));
    }

    session.state.paste_item(&session.current()).await?;

    Ok(())
}

pub async fn purge(session: &Session) -> error::Result {
    let trash = TrashNode::new(
        session.drive.drive_id.clone(),
        session.drive.group_id.clone(),
    );

    session.state.purge_drive(&trash).await?;

    println!("trash cleared");

    Ok(())
}

pub async fn refresh(session: &Session) -> error::Result {
    session.state.refresh().await;

    Ok(())
}

pub async fn download(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();
    let node = session.find(name).await?;
    let item = node.as_item()
        .context("only items can be downloaded")?;

    session.state.download_item(item).await?;

    println!("saved {}", item.name);

    Ok(())
}

pub async fn upload(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();
    let node = session.find(name).await?;
    let item = node.as_item()
        .context("only items can be uploaded")?;

    session.state.upload_asset(item).await?;

    println!("uploaded {}", item.name);

    Ok(())
}

pub async fn menu(session: &Session, matches: &ArgMatches) -> error::Result {
    let name = matches.get_one::<String>("name").unwrap();
    let node = session.find(name).await?;
    let actions = resolve_actions(&session.state, &node).await?;

    if let Some(run) = matches.get_one::<String>("run") {
        let action = actions.into_iter()
            .find(|action| action.name == *run)
            .context(format!("\"{}\" is not in the menu of \"{}\"", run, name))?;

        session.state.execute(action).await?;

        return Ok(());
    }

    if actions.is_empty() {
        println!("no actions for \"{}\"", name);

        return Ok(());
    }

    for action in actions {
        let state = if action.enabled { "" } else { "  (disabled)" };

        println!("{:<14} {}{}", action.section.to_string(), action.name, state);
    }

    Ok(())
}
