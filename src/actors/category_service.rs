use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::CategoryClient;
use crate::domain::seed::ALL_CATEGORIES;
use crate::error::CategoryError;
use crate::messages::{CategoryRequest, ServiceResponse};

/// Owns the category filter list. Menu items store their category as a plain
/// string, so nothing here reaches into the menu.
pub struct CategoryService {
    receiver: mpsc::Receiver<CategoryRequest>,
    categories: Vec<String>,
}

impl CategoryService {
    pub fn new(buffer_size: usize, initial: Vec<String>) -> (Self, CategoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            categories: initial,
        };
        (service, CategoryClient::new(sender))
    }

    #[instrument(name = "category_service", skip(self))]
    pub async fn run(mut self) {
        info!(category_count = self.categories.len(), "CategoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CategoryRequest::ListCategories { respond_to } => {
                    let _ = respond_to.send(Ok(self.categories.clone()));
                }
                CategoryRequest::AddCategory { name, respond_to } => {
                    self.handle_add_category(name, respond_to);
                }
                CategoryRequest::RenameCategory {
                    old_name,
                    new_name,
                    respond_to,
                } => {
                    self.handle_rename_category(old_name, new_name, respond_to);
                }
                CategoryRequest::RemoveCategory { name, respond_to } => {
                    self.handle_remove_category(name, respond_to);
                }
                CategoryRequest::Shutdown => {
                    info!("CategoryService shutting down");
                    break;
                }
            }
        }

        info!("CategoryService stopped");
    }

    /// Duplicate names are ignored rather than rejected; the reply says whether anything changed.
    #[instrument(skip(self, respond_to))]
    fn handle_add_category(&mut self, name: String, respond_to: ServiceResponse<bool, CategoryError>) {
        debug!("Processing add_category request");
        let name = name.trim().to_string();
        if name.is_empty() {
            send_error!(
                respond_to,
                CategoryError::ValidationError("Category name required".to_string())
            );
        }
        if self.categories.contains(&name) {
            debug!("Category already present");
            let _ = respond_to.send(Ok(false));
            return;
        }
        self.categories.push(name);
        info!("Category added");
        let _ = respond_to.send(Ok(true));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_rename_category(
        &mut self,
        old_name: String,
        new_name: String,
        respond_to: ServiceResponse<(), CategoryError>,
    ) {
        debug!("Processing rename_category request");
        let new_name = new_name.trim().to_string();
        if old_name == ALL_CATEGORIES || new_name == ALL_CATEGORIES {
            send_error!(
                respond_to,
                CategoryError::ValidationError(format!("\"{}\" is reserved", ALL_CATEGORIES))
            );
        }
        if new_name.is_empty() {
            send_error!(
                respond_to,
                CategoryError::ValidationError("Category name required".to_string())
            );
        }
        if new_name != old_name && self.categories.contains(&new_name) {
            error!("Rename target already exists");
            send_error!(respond_to, CategoryError::AlreadyExists(new_name));
        }
        let Some(slot) = self.categories.iter_mut().find(|c| **c == old_name) else {
            send_error!(respond_to, CategoryError::NotFound(old_name));
        };
        *slot = new_name;
        info!("Category renamed");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_category(&mut self, name: String, respond_to: ServiceResponse<(), CategoryError>) {
        debug!("Processing remove_category request");
        if name == ALL_CATEGORIES {
            send_error!(
                respond_to,
                CategoryError::ValidationError(format!("\"{}\" is reserved", ALL_CATEGORIES))
            );
        }
        let before = self.categories.len();
        self.categories.retain(|c| *c != name);
        if self.categories.len() == before {
            send_error!(respond_to, CategoryError::NotFound(name));
        }
        info!("Category removed");
        let _ = respond_to.send(Ok(()));
    }
}
