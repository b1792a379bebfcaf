use std::cell::RefCell;
use std::rc::Rc;
use crate::ast::AstNode;
use crate::executor::{Executor, ExecStatus, ExecOutcome};

/// Records every tree it is asked to run instead of forking.
pub struct MockExecutor {
    pub log: Rc<RefCell<Vec<AstNode>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self { log: Rc::new(RefCell::new(Vec::new())) }
    }
}

impl Executor for MockExecutor {
    fn exec(&mut self, node: &AstNode) -> ExecStatus {
        self.log.borrow_mut().push(node.clone());
        Ok(ExecOutcome::Code(0))
    }
}
