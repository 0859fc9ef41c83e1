use tokio::sync::mpsc;

use crate::error::CategoryError;
use crate::messages::CategoryRequest;

/// Client for the CategoryService.
#[derive(Clone)]
pub struct CategoryClient {
    sender: mpsc::Sender<CategoryRequest>,
}

impl CategoryClient {
    pub fn new(sender: mpsc::Sender<CategoryRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CategoryClient => fn list_categories() -> Vec<String> as CategoryRequest::ListCategories, Error = CategoryError);
client_method!(CategoryClient => fn add_category(name: String) -> bool as CategoryRequest::AddCategory, Error = CategoryError);
client_method!(CategoryClient => fn rename_category(old_name: String, new_name: String) -> () as CategoryRequest::RenameCategory, Error = CategoryError);
client_method!(CategoryClient => fn remove_category(name: String) -> () as CategoryRequest::RemoveCategory, Error = CategoryError);
impl_shutdown!(CategoryClient, CategoryRequest, CategoryError);
