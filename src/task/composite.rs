use super::{ByteRange, DataIoTask, IoType, TaskFailure, TaskOutcome, TaskState};
use crate::{credential::Credential, error::Result, item::DataItem};
use delegate::delegate;
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

struct CompositeProgress {
    pending: AtomicUsize,
    aborted: AtomicBool,
}

pub struct PartialDataIoTask {
    inner: DataIoTask,
    part_number: usize,
    progress: Arc<CompositeProgress>,
}

impl PartialDataIoTask {
    delegate! {
        target self.inner {
            pub fn io_type(&self) -> IoType;
            pub fn item(&self) -> &DataItem;
            pub fn src_path(&self) -> Option<&str>;
            pub fn dst_path(&self) -> &str;
            pub fn credential(&self) -> &Credential;
            pub fn range(&self) -> Option<ByteRange>;
            pub fn state(&self) -> TaskState;
            pub fn succeeded(&self) -> bool;
            pub fn failure(&self) -> Option<&TaskFailure>;
            pub fn start_request(&self) -> Result<()>;
            pub fn finish_request(&self) -> Result<()>;
            pub fn start_response(&self) -> Result<()>;
        }
    }

    pub fn part_number(&self) -> usize {
        self.part_number
    }

    /// Returns `true` for exactly the call that completes the last pending
    /// part, so the caller can trigger the manifest request once.
    pub fn finish_response(&self, outcome: TaskOutcome) -> Result<bool> {
        let succeeded = outcome == TaskOutcome::Succeeded;
        self.inner.finish_response(outcome)?;
        if succeeded {
            Ok(self.progress.pending.fetch_sub(1, Ordering::AcqRel) == 1)
        } else {
            Ok(false)
        }
    }
}

impl fmt::Debug for PartialDataIoTask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PartialDataIoTask")
            .field("inner", &self.inner)
            .field("part_number", &self.part_number)
            .finish()
    }
}

pub struct CompositeDataIoTask {
    inner: DataIoTask,
    part_size: u64,
    sub_tasks: Vec<PartialDataIoTask>,
    progress: Arc<CompositeProgress>,
}

impl CompositeDataIoTask {
    pub fn new(
        io_type: IoType,
        item: DataItem,
        src_path: Option<&str>,
        dst_path: &str,
        credential: &Credential,
        part_size: u64,
    ) -> CompositeDataIoTask {
        assert!(part_size > 0, "part size must be positive");
        let size = item.size();
        let count = ((size + part_size - 1) / part_size) as usize;
        let progress = Arc::new(CompositeProgress {
            pending: AtomicUsize::new(count),
            aborted: AtomicBool::new(false),
        });
        let sub_tasks = (0..count)
            .map(|index| {
                let offset = index as u64 * part_size;
                PartialDataIoTask {
                    inner: DataIoTask::new(
                        io_type,
                        item.clone(),
                        src_path,
                        dst_path,
                        credential.to_owned(),
                        Some(ByteRange::new(offset, part_size.min(size - offset))),
                    ),
                    part_number: index + 1,
                    progress: progress.clone(),
                }
            })
            .collect();
        CompositeDataIoTask {
            inner: DataIoTask::new(io_type, item, src_path, dst_path, credential.to_owned(), None),
            part_size,
            sub_tasks,
            progress,
        }
    }

    delegate! {
        target self.inner {
            pub fn io_type(&self) -> IoType;
            pub fn item(&self) -> &DataItem;
            pub fn src_path(&self) -> Option<&str>;
            pub fn dst_path(&self) -> &str;
            pub fn credential(&self) -> &Credential;
            pub fn state(&self) -> TaskState;
            pub fn succeeded(&self) -> bool;
            pub fn failure(&self) -> Option<&TaskFailure>;
            pub fn start_request(&self) -> Result<()>;
            pub fn finish_request(&self) -> Result<()>;
            pub fn start_response(&self) -> Result<()>;
            pub fn finish_response(&self, outcome: TaskOutcome) -> Result<()>;
        }
    }

    pub fn part_size(&self) -> u64 {
        self.part_size
    }

    pub fn sub_tasks(&self) -> &[PartialDataIoTask] {
        &self.sub_tasks
    }

    pub fn all_sub_tasks_done(&self) -> bool {
        self.progress.pending.load(Ordering::Acquire) == 0
    }

    pub fn abort(&self) {
        self.progress.aborted.store(true, Ordering::Release);
    }

    pub fn aborted(&self) -> bool {
        self.progress.aborted.load(Ordering::Acquire)
    }
}

impl fmt::Debug for CompositeDataIoTask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompositeDataIoTask")
            .field("inner", &self.inner)
            .field("part_size", &self.part_size)
            .field("sub_tasks", &self.sub_tasks.len())
            .field("pending", &self.progress.pending.load(Ordering::Acquire))
            .field("aborted", &self.aborted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::FailureKind;
    use std::thread;

    fn new_dlo_task(size: u64, part_size: u64) -> CompositeDataIoTask {
        CompositeDataIoTask::new(
            IoType::Create,
            DataItem::new("00003brre8lgz", 123, size),
            None,
            "/container2",
            &Credential::new("user1", "secret"),
            part_size,
        )
    }

    fn drive_to_response(task: &PartialDataIoTask) {
        task.start_request().unwrap();
        task.finish_request().unwrap();
        task.start_response().unwrap();
    }

    #[test]
    fn test_part_slicing() {
        let task = new_dlo_task(12345, 1234);
        assert_eq!(task.sub_tasks().len(), 11);
        for (index, sub_task) in task.sub_tasks().iter().enumerate() {
            assert_eq!(sub_task.part_number(), index + 1);
            let range = sub_task.range().unwrap();
            assert_eq!(range.offset(), index as u64 * 1234);
        }
        assert_eq!(task.sub_tasks()[10].range().unwrap().len(), 12345 - 10 * 1234);
    }

    #[test]
    fn test_all_sub_tasks_done_only_after_every_success() {
        let task = new_dlo_task(12345, 1234);
        for sub_task in task.sub_tasks() {
            assert!(!task.all_sub_tasks_done());
            drive_to_response(sub_task);
            sub_task.finish_response(TaskOutcome::Succeeded).unwrap();
        }
        assert!(task.all_sub_tasks_done());
    }

    #[test]
    fn test_failed_part_blocks_completion() {
        let task = new_dlo_task(2468, 1234);
        let sub_tasks = task.sub_tasks();
        drive_to_response(&sub_tasks[0]);
        sub_tasks[0]
            .finish_response(TaskOutcome::Failed(TaskFailure::new(
                FailureKind::Transport,
                None,
            )))
            .unwrap();
        drive_to_response(&sub_tasks[1]);
        assert!(!sub_tasks[1].finish_response(TaskOutcome::Succeeded).unwrap());
        assert!(!task.all_sub_tasks_done());
    }

    #[test]
    fn test_concurrent_completions_observe_the_edge_once() {
        let task = Arc::new(new_dlo_task(16 << 10, 1 << 10));
        let part_count = task.sub_tasks().len();
        assert_eq!(part_count, 16);
        let edges = Arc::new(AtomicUsize::new(0));
        let mut threads = Vec::new();
        for index in 0..part_count {
            let task = task.clone();
            let edges = edges.clone();
            threads.push(thread::spawn(move || {
                let sub_task = &task.sub_tasks()[index];
                drive_to_response(sub_task);
                if sub_task.finish_response(TaskOutcome::Succeeded).unwrap() {
                    edges.fetch_add(1, Ordering::AcqRel);
                }
            }));
        }
        threads.into_iter().for_each(|thread| thread.join().unwrap());
        assert!(task.all_sub_tasks_done());
        assert_eq!(edges.load(Ordering::Acquire), 1);
    }

    #[test]
    fn test_abort_is_sticky() {
        let task = new_dlo_task(2468, 1234);
        assert!(!task.aborted());
        task.abort();
        assert!(task.aborted());
        for sub_task in task.sub_tasks() {
            drive_to_response(sub_task);
            sub_task.finish_response(TaskOutcome::Succeeded).unwrap();
        }
        assert!(task.all_sub_tasks_done());
        assert!(task.aborted());
    }
}
