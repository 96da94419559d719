use super::{IoType, TaskFailure, TaskOutcome, TaskState};
use crate::{
    credential::Credential,
    error::{Error, Result},
    item::DataItem,
};
use assert_impl::assert_impl;
use getset::CopyGetters;
use once_cell::sync::OnceCell;
use std::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[get_copy = "pub"]
pub struct ByteRange {
    offset: u64,
    len: u64,
}

impl ByteRange {
    pub fn new(offset: u64, len: u64) -> ByteRange {
        ByteRange { offset, len }
    }
}

pub struct DataIoTask {
    io_type: IoType,
    item: DataItem,
    src_path: Option<Box<str>>,
    dst_path: Box<str>,
    credential: Credential,
    range: Option<ByteRange>,
    state: AtomicU8,
    failure: OnceCell<TaskFailure>,
}

impl DataIoTask {
    pub fn new(
        io_type: IoType,
        item: DataItem,
        src_path: Option<&str>,
        dst_path: &str,
        credential: Credential,
        range: Option<ByteRange>,
    ) -> DataIoTask {
        DataIoTask {
            io_type,
            item,
            src_path: src_path.map(|path| path.into()),
            dst_path: dst_path.into(),
            credential,
            range,
            state: AtomicU8::new(TaskState::Pending as u8),
            failure: OnceCell::new(),
        }
    }

    pub fn io_type(&self) -> IoType {
        self.io_type
    }

    pub fn item(&self) -> &DataItem {
        &self.item
    }

    pub fn src_path(&self) -> Option<&str> {
        self.src_path.as_ref().map(|path| path.as_ref())
    }

    pub fn dst_path(&self) -> &str {
        self.dst_path.as_ref()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn range(&self) -> Option<ByteRange> {
        self.range
    }

    pub fn state(&self) -> TaskState {
        TaskState::from_repr(self.state.load(Ordering::Acquire))
    }

    pub fn succeeded(&self) -> bool {
        self.state() == TaskState::Succeeded
    }

    pub fn failure(&self) -> Option<&TaskFailure> {
        self.failure.get()
    }

    pub fn start_request(&self) -> Result<()> {
        self.transit(TaskState::Pending, TaskState::RequestActive, "start_request()")
    }

    pub fn finish_request(&self) -> Result<()> {
        self.transit(TaskState::RequestActive, TaskState::RequestDone, "finish_request()")
    }

    pub fn start_response(&self) -> Result<()> {
        self.transit(TaskState::RequestDone, TaskState::ResponseActive, "start_response()")
    }

    pub fn finish_response(&self, outcome: TaskOutcome) -> Result<()> {
        match outcome {
            TaskOutcome::Succeeded => {
                self.transit(TaskState::ResponseActive, TaskState::Succeeded, "finish_response()")
            }
            TaskOutcome::Failed(failure) => {
                self.transit(TaskState::ResponseActive, TaskState::Failed, "finish_response()")?;
                let _ = self.failure.set(failure);
                Ok(())
            }
        }
    }

    fn transit(&self, from: TaskState, to: TaskState, hook: &'static str) -> Result<()> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|actual| {
                Error::StateViolation(format!(
                    "{} expects a {:?} task, but the task is {:?}",
                    hook,
                    from,
                    TaskState::from_repr(actual)
                ))
            })
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

impl fmt::Debug for DataIoTask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DataIoTask")
            .field("io_type", &self.io_type)
            .field("item", &self.item)
            .field("src_path", &self.src_path)
            .field("dst_path", &self.dst_path)
            .field("range", &self.range)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::FailureKind;

    fn new_task() -> DataIoTask {
        DataIoTask::new(
            IoType::Create,
            DataItem::new("00003brre8lgz", 123, 10240),
            None,
            "/container0",
            Credential::new("user1", "secret"),
            None,
        )
    }

    #[test]
    fn test_lifecycle_in_order() {
        let task = new_task();
        assert_eq!(task.state(), TaskState::Pending);
        task.start_request().unwrap();
        assert_eq!(task.state(), TaskState::RequestActive);
        task.finish_request().unwrap();
        assert_eq!(task.state(), TaskState::RequestDone);
        task.start_response().unwrap();
        assert_eq!(task.state(), TaskState::ResponseActive);
        task.finish_response(TaskOutcome::Succeeded).unwrap();
        assert_eq!(task.state(), TaskState::Succeeded);
        assert!(task.succeeded());
        assert!(task.failure().is_none());
    }

    #[test]
    fn test_start_request_twice_fails_loudly() {
        let task = new_task();
        task.start_request().unwrap();
        match task.start_request() {
            Err(Error::StateViolation(_)) => {}
            other => panic!("expected a state violation, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_finish_before_start_fails_loudly() {
        let task = new_task();
        assert!(matches!(
            task.finish_request(),
            Err(Error::StateViolation(_))
        ));
        assert!(matches!(
            task.finish_response(TaskOutcome::Succeeded),
            Err(Error::StateViolation(_))
        ));
        assert_eq!(task.state(), TaskState::Pending);
    }

    #[test]
    fn test_failure_outcome_is_recorded() {
        let task = new_task();
        task.start_request().unwrap();
        task.finish_request().unwrap();
        task.start_response().unwrap();
        task.finish_response(TaskOutcome::Failed(TaskFailure::new(
            FailureKind::Protocol,
            Some(503),
        )))
        .unwrap();
        assert_eq!(task.state(), TaskState::Failed);
        let failure = task.failure().unwrap();
        assert_eq!(failure.kind(), FailureKind::Protocol);
        assert_eq!(failure.status(), Some(503));
    }
}
