use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use ras::collab::nav::Navigator;
use ras::collab::ui::{AppOpener, Prompter, SystemClipboard};
use ras::nodes::{DriveNode, ExplorerNode, FolderNode, TrashNode};
use ras::state::{ExplorerConfig, ExplorerState};
use ras::store::AssetStore;
use ras_api::client::ApiClient;
use ras_api::explorer as api;

use crate::error::{self, Context};
use crate::input;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// tracks where the shell currently sits. listings are fetched on demand
/// by the `ls` command, so a refresh only needs to note the request.
pub struct ShellNavigator {
    current: Mutex<String>,
}

impl ShellNavigator {
    pub fn at(path: &str) -> Self {
        ShellNavigator {
            current: Mutex::new(path.into()),
        }
    }

    pub fn set_current(&self, path: &str) {
        *lock(&self.current) = path.into();
    }
}

#[async_trait]
impl Navigator for ShellNavigator {
    async fn navigate_to(&self, path: &str) {
        tracing::debug!(path, "navigate");

        *lock(&self.current) = path.into();
    }

    async fn refresh(&self, path: &str) {
        tracing::info!(path, "listing refreshed");
    }

    fn current_path(&self) -> String {
        lock(&self.current).clone()
    }

    fn parent_path(&self) -> String {
        ras_lib::path::parent(&lock(&self.current)).to_string()
    }
}

pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&self, label: &str, current: &str) -> Option<String> {
        let given = input::read_stdin_trimmed(format!("{} [{}] ", label, current)).ok()?;

        if given.is_empty() {
            None
        } else {
            Some(given)
        }
    }
}

/// the closest analogue of the OS clipboard this shell has
pub struct PrintClipboard;

impl SystemClipboard for PrintClipboard {
    fn write_text(&self, text: &str) {
        println!("{}", text);
    }
}

pub struct PrintOpener;

impl AppOpener for PrintOpener {
    fn open(&self, url: &str) {
        println!("open {}", url);
    }
}

/// one connected shell: the explorer state plus the location stack the
/// `cd` command walks
pub struct Session {
    pub state: ExplorerState,
    pub router: Arc<ShellNavigator>,
    pub drive: api::DefaultDrive,
    store: Arc<ApiClient>,
    stack: Mutex<Vec<ExplorerNode>>,
}

impl Session {
    pub async fn open(
        store: Arc<ApiClient>,
        group_id: &str,
        config: ExplorerConfig,
    ) -> error::Result<Session> {
        let drive = store.default_drive(group_id)
            .await?
            .context("the group has no default drive")?;

        let router = Arc::new(ShellNavigator::at(&format!("/{}", drive.drive_id)));

        let mut builder = ExplorerState::builder(store.clone(), router.clone());

        builder.prompter(Arc::new(StdinPrompter));
        builder.clipboard(Arc::new(PrintClipboard));
        builder.opener(Arc::new(PrintOpener));
        builder.config(config);

        let root = ExplorerNode::from(Arc::new(DriveNode::new(api::Drive {
            drive_id: drive.drive_id.clone(),
            group_id: drive.group_id.clone(),
            name: drive.name.clone(),
        })));

        Ok(Session {
            state: builder.build(),
            router,
            drive,
            store,
            stack: Mutex::new(vec![root]),
        })
    }

    pub fn current(&self) -> ExplorerNode {
        lock(&self.stack)
            .last()
            .expect("the location stack always holds the drive root")
            .clone()
    }

    /// id the asset store lists the current location under
    pub fn current_container_id(&self) -> Option<String> {
        match self.current() {
            ExplorerNode::Drive(drive) => Some(drive.drive_id.clone()),
            ExplorerNode::Folder(folder) => Some(folder.folder_id.clone()),
            _ => None,
        }
    }

    pub fn enter(&self, node: ExplorerNode) {
        let mut stack = lock(&self.stack);

        stack.push(node);
        self.sync_router(&stack);
    }

    pub fn leave(&self) {
        let mut stack = lock(&self.stack);

        if stack.len() > 1 {
            stack.pop();
        }

        self.sync_router(&stack);
    }

    fn sync_router(&self, stack: &[ExplorerNode]) {
        let mut path = String::new();

        for node in stack {
            path.push('/');
            path.push_str(node.id());
        }

        self.router.set_current(&path);
    }

    pub async fn listing(&self) -> error::Result<api::Children> {
        match self.current() {
            ExplorerNode::Trash(trash) => {
                let deleted = self.store.deleted(&trash.drive_id)
                    .await?
                    .context("the drive is gone")?;

                Ok(api::Children {
                    folders: deleted.folders,
                    items: deleted.items,
                })
            },
            node => {
                let container = node.id();

                self.store.children(container)
                    .await?
                    .context("the current folder is gone")
            }
        }
    }

    /// resolves a display name from the current listing into a node.
    /// `trash` addresses the synthetic trash leaf of the drive.
    pub async fn find(&self, name: &str) -> error::Result<ExplorerNode> {
        if name.eq_ignore_ascii_case("trash") {
            return Ok(ExplorerNode::from(Arc::new(TrashNode::new(
                self.drive.drive_id.clone(),
                self.drive.group_id.clone(),
            ))));
        }

        let listing = self.listing().await?;

        if let Some(folder) = listing.folders.into_iter().find(|folder| folder.name == name) {
            return Ok(ExplorerNode::from(Arc::new(FolderNode::new(folder))));
        }

        if let Some(item) = listing.items.iter().find(|item| item.name == name) {
            return Ok(ExplorerNode::from(self.state.get_item_data(item)));
        }

        Err(error::Error::from(format!("nothing named \"{}\" here", name)))
    }
}
