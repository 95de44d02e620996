use super::test_helpers::*;
use super::*;
use crate::error::{Error, FetchError, TaskErrorKind};
use crate::types::{DownloadTask, Event, NamePrefix, RunMode};
use std::sync::Arc;
