use indexmap::IndexMap;
use thiserror::Error;
use crate::attacher::engine::AttachmentParameters;
use crate::document::shape::ShapeData;
use crate::util::transform::Transform;

#[derive(Debug, Error, PartialEq)]
pub enum TransactionError {
  #[error("No open transaction to commit")]
  NothingToCommit,

  #[error("No open transaction to abort")]
  NothingToAbort,
}

/// One object of the host document.
///
/// `depends_on` is the object's explicit out-list (features it was built
/// from); attachment references contribute additional dependencies through
/// `dependency_names`.
#[derive(Clone, Debug)]
pub struct DocumentObject {
  pub name: String,
  pub label: String,
  pub placement: Transform,
  pub visible: bool,
  /// Whether the object declares attachment support at all.
  pub attachable: bool,
  pub shape: ShapeData,
  pub depends_on: Vec<String>,
  pub attachment: Option<AttachmentParameters>,
}

impl DocumentObject {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      label: name.to_string(),
      placement: Transform::identity(),
      visible: true,
      attachable: true,
      shape: ShapeData::new(),
      depends_on: Vec::new(),
      attachment: None,
    }
  }

  /// All object names this object depends on: the explicit out-list plus
  /// the owners of its attachment references, deduplicated in order.
  pub fn dependency_names(&self) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for dep in &self.depends_on {
      if !names.contains(dep) {
        names.push(dep.clone());
      }
    }
    if let Some(attachment) = &self.attachment {
      for reference in &attachment.references {
        if !names.contains(&reference.object) {
          names.push(reference.object.clone());
        }
      }
    }
    names
  }
}

struct TransactionRecord {
  label: String,
  saved_objects: IndexMap<String, DocumentObject>,
}

/// In-memory host document: an ordered object table plus a transaction
/// stack with snapshot/restore semantics.
pub struct Document {
  pub name: String,
  objects: IndexMap<String, DocumentObject>,
  transactions: Vec<TransactionRecord>,
}

impl Document {

  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      objects: IndexMap::new(),
      transactions: Vec::new(),
    }
  }

  pub fn add_object(&mut self, object: DocumentObject) {
    self.objects.insert(object.name.clone(), object);
  }

  pub fn get_object(&self, name: &str) -> Option<&DocumentObject> {
    self.objects.get(name)
  }

  pub fn get_object_mut(&mut self, name: &str) -> Option<&mut DocumentObject> {
    self.objects.get_mut(name)
  }

  pub fn objects(&self) -> impl Iterator<Item = &DocumentObject> {
    self.objects.values()
  }

  /// Names of the objects that directly depend on `name`.
  pub fn in_list(&self, name: &str) -> Vec<String> {
    self
      .objects
      .values()
      .filter(|obj| obj.dependency_names().iter().any(|dep| dep == name))
      .map(|obj| obj.name.clone())
      .collect()
  }

  /// Opens an undo transaction, snapshotting the whole object table.
  pub fn open_transaction(&mut self, label: &str) {
    self.transactions.push(TransactionRecord {
      label: label.to_string(),
      saved_objects: self.objects.clone(),
    });
  }

  /// Commits the innermost open transaction, keeping all changes.
  pub fn commit_transaction(&mut self) -> Result<(), TransactionError> {
    self
      .transactions
      .pop()
      .map(|_| ())
      .ok_or(TransactionError::NothingToCommit)
  }

  /// Aborts the innermost open transaction, restoring the snapshot taken
  /// when it was opened.
  pub fn abort_transaction(&mut self) -> Result<(), TransactionError> {
    match self.transactions.pop() {
      Some(record) => {
        self.objects = record.saved_objects;
        Ok(())
      }
      None => Err(TransactionError::NothingToAbort),
    }
  }

  pub fn has_open_transaction(&self) -> bool {
    !self.transactions.is_empty()
  }

  pub fn current_transaction_label(&self) -> Option<&str> {
    self.transactions.last().map(|record| record.label.as_str())
  }
}
