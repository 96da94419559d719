mod composite;
mod data;

pub use composite::{CompositeDataIoTask, PartialDataIoTask};
pub use data::{ByteRange, DataIoTask};

use crate::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoType {
    Noop,
    Create,
    Read,
    Update,
    Delete,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TaskState {
    Pending,
    RequestActive,
    RequestDone,
    ResponseActive,
    Succeeded,
    Failed,
}

impl TaskState {
    pub(crate) fn from_repr(repr: u8) -> TaskState {
        match repr {
            0 => TaskState::Pending,
            1 => TaskState::RequestActive,
            2 => TaskState::RequestDone,
            3 => TaskState::ResponseActive,
            4 => TaskState::Succeeded,
            _ => TaskState::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Auth,
    Protocol,
    Decode,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    status: Option<StatusCode>,
    kind: FailureKind,
}

impl TaskFailure {
    pub fn new(kind: FailureKind, status: Option<StatusCode>) -> TaskFailure {
        TaskFailure { kind, status }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Failed(TaskFailure),
}

#[derive(Clone, Copy)]
pub enum IoTaskRef<'a> {
    Data(&'a DataIoTask),
    Composite(&'a CompositeDataIoTask),
    Partial(&'a PartialDataIoTask),
}

impl<'a> From<&'a DataIoTask> for IoTaskRef<'a> {
    fn from(task: &'a DataIoTask) -> Self {
        IoTaskRef::Data(task)
    }
}

impl<'a> From<&'a CompositeDataIoTask> for IoTaskRef<'a> {
    fn from(task: &'a CompositeDataIoTask) -> Self {
        IoTaskRef::Composite(task)
    }
}

impl<'a> From<&'a PartialDataIoTask> for IoTaskRef<'a> {
    fn from(task: &'a PartialDataIoTask) -> Self {
        IoTaskRef::Partial(task)
    }
}
