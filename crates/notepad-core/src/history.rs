//! Undo/redo history built from invertible text edits.

/// A single splice of the buffer: `deleted` was removed at `offset` and
/// `inserted` put in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Byte offset where the edit occurred
    pub offset: usize,
    /// Text that was deleted (empty for pure inserts)
    pub deleted: String,
    /// Text that was inserted (empty for pure deletes)
    pub inserted: String,
}

impl EditOperation {
    pub fn new(offset: usize, deleted: impl Into<String>, inserted: impl Into<String>) -> Self {
        Self {
            offset,
            deleted: deleted.into(),
            inserted: inserted.into(),
        }
    }

    /// The operation that undoes this one.
    pub fn inverse(&self) -> Self {
        Self {
            offset: self.offset,
            deleted: self.inserted.clone(),
            inserted: self.deleted.clone(),
        }
    }

    /// Splices this operation into `text`, returning the byte offset just
    /// past the inserted text.
    pub fn apply(&self, text: &mut String) -> usize {
        let end = self.offset + self.deleted.len();
        text.replace_range(self.offset..end, &self.inserted);
        self.offset + self.inserted.len()
    }

    fn is_insert(&self) -> bool {
        self.deleted.is_empty() && !self.inserted.is_empty()
    }

    fn is_delete(&self) -> bool {
        self.inserted.is_empty() && !self.deleted.is_empty()
    }
}

/// One undo step. Usually a single operation; Replace All and coalesced typing
/// produce several or merged ones.
pub type Transaction = Vec<EditOperation>;

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    open_group: Option<Transaction>,
    // Only a step recorded by `push_typing` may absorb the next keystroke.
    last_is_typing: bool,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            open_group: None,
            last_is_typing: false,
            max_size: max_size.max(1),
        }
    }

    /// Records an operation as its own undo step (or into the open group).
    pub fn push(&mut self, op: EditOperation) {
        self.redo_stack.clear();
        self.last_is_typing = false;
        match self.open_group.as_mut() {
            Some(group) => group.push(op),
            None => self.push_transaction(vec![op]),
        }
    }

    /// Records a keystroke-sized edit, merging it into the previous step when
    /// it continues the same run of typing or deleting.
    pub fn push_typing(&mut self, op: EditOperation) {
        if self.last_is_typing && self.open_group.is_none() && self.redo_stack.is_empty() {
            if let Some(last) = self.undo_stack.last_mut().and_then(|t| {
                if t.len() == 1 {
                    t.last_mut()
                } else {
                    None
                }
            }) {
                if Self::merge(last, &op) {
                    return;
                }
            }
        }
        self.push(op);
        self.last_is_typing = self.open_group.is_none();
    }

    fn merge(last: &mut EditOperation, op: &EditOperation) -> bool {
        let single_char = |s: &str| s.chars().count() == 1;

        // Typing forward: "ab" + "c" at the end of the previous insert.
        if last.is_insert()
            && op.is_insert()
            && single_char(&op.inserted)
            && op.offset == last.offset + last.inserted.len()
            && !last.inserted.ends_with(char::is_whitespace)
            && !op.inserted.contains('\n')
        {
            last.inserted.push_str(&op.inserted);
            return true;
        }

        // Backspacing: each delete ends where the previous one started.
        if last.is_delete()
            && op.is_delete()
            && single_char(&op.deleted)
            && op.offset + op.deleted.len() == last.offset
            && !op.deleted.contains('\n')
        {
            last.deleted.insert_str(0, &op.deleted);
            last.offset = op.offset;
            return true;
        }

        false
    }

    /// Starts collecting pushes into a single undo step.
    pub fn begin_group(&mut self) {
        if self.open_group.is_none() {
            self.open_group = Some(Vec::new());
        }
    }

    pub fn end_group(&mut self) {
        if let Some(group) = self.open_group.take() {
            if !group.is_empty() {
                self.push_transaction(group);
            }
        }
    }

    fn push_transaction(&mut self, transaction: Transaction) {
        self.last_is_typing = false;
        self.undo_stack.push(transaction);

        // Trim if exceeded max size
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Pops the most recent step for undoing; it moves to the redo stack.
    pub fn pop_undo(&mut self) -> Option<Transaction> {
        self.end_group();
        self.last_is_typing = false;
        let transaction = self.undo_stack.pop()?;
        self.redo_stack.push(transaction.clone());
        Some(transaction)
    }

    /// Pops the most recently undone step for re-applying.
    pub fn pop_redo(&mut self) -> Option<Transaction> {
        self.end_group();
        self.last_is_typing = false;
        let transaction = self.redo_stack.pop()?;
        self.undo_stack.push(transaction.clone());
        Some(transaction)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || self.open_group.as_ref().is_some_and(|g| !g.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group = None;
        self.last_is_typing = false;
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}
