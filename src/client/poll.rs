// This file is part of the terraform-provider-azurerm project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::debug;

use super::{ApiError, ArmApi, Operation, OperationStatus};

/// Absolute point in time a whole CRUD invocation must finish by
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    fn timeout(&self) -> ApiError {
        ApiError::Timeout { after: self.budget }
    }

    /// Run a single remote call, failing with a timeout once the deadline is reached
    pub async fn run<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        match timeout_at(self.at, call).await {
            Ok(result) => result,
            Err(_) => Err(self.timeout()),
        }
    }
}

/// Poll `operation` every `api.poll_interval()` until it reaches a terminal state.
///
/// Returns the body of the final response, if the operation produced one.
pub async fn wait_for_completion<A>(
    api: &A,
    operation: Operation,
    deadline: &Deadline,
) -> Result<Option<serde_json::Value>, ApiError>
where
    A: ArmApi + ?Sized,
{
    if let Operation::Completed(body) = operation {
        return Ok(body);
    }

    let interval = api.poll_interval();
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match deadline.run(api.poll_operation(&operation)).await? {
            OperationStatus::Succeeded(body) => {
                debug!(attempt, "long-running operation succeeded");
                return Ok(body);
            }
            OperationStatus::Failed { status, message } => {
                return Err(ApiError::OperationFailed { status, message });
            }
            OperationStatus::InProgress => {
                debug!(attempt, "long-running operation still in progress");
            }
        }

        sleep_until((Instant::now() + interval).min(deadline.at)).await;
        if deadline.is_expired() {
            return Err(deadline.timeout());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    struct Scripted {
        polls: AtomicUsize,
        done_after: usize,
        outcome: OperationStatus,
    }

    impl Scripted {
        fn new(done_after: usize, outcome: OperationStatus) -> Self {
            Self {
                polls: AtomicUsize::new(0),
                done_after,
                outcome,
            }
        }
    }

    #[async_trait]
    impl ArmApi for Scripted {
        fn subscription_id(&self) -> &str {
            "00000000-0000-0000-0000-000000000000"
        }

        fn poll_interval(&self) -> Duration {
            Duration::from_secs(10)
        }

        async fn poll_operation(&self, _: &Operation) -> Result<OperationStatus, ApiError> {
            let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
            if polls >= self.done_after {
                Ok(self.outcome.clone())
            } else {
                Ok(OperationStatus::InProgress)
            }
        }
    }

    fn pending() -> Operation {
        Operation::AsyncOperation {
            url: "https://management.azure.com/operations/1".to_string(),
            result: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn completed_operation_is_not_polled() {
        let api = Scripted::new(1, OperationStatus::InProgress);
        let body = serde_json::json!({"name": "x"});
        let deadline = Deadline::after(Duration::from_secs(60));

        let result = wait_for_completion(&api, Operation::Completed(Some(body.clone())), &deadline)
            .await
            .unwrap();

        assert_eq!(result, Some(body));
        assert_eq!(api.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_success() {
        let api = Scripted::new(3, OperationStatus::Succeeded(None));
        let deadline = Deadline::after(Duration::from_secs(300));

        let result = wait_for_completion(&api, pending(), &deadline).await.unwrap();

        assert_eq!(result, None);
        assert_eq!(api.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_operation_is_reported() {
        let api = Scripted::new(
            2,
            OperationStatus::Failed {
                status: "Failed".to_string(),
                message: "quota exceeded".to_string(),
            },
        );
        let deadline = Deadline::after(Duration::from_secs(300));

        let err = wait_for_completion(&api, pending(), &deadline)
            .await
            .unwrap_err();

        assert!(
            matches!(err, ApiError::OperationFailed { ref message, .. } if message == "quota exceeded")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_at_deadline() {
        let api = Scripted::new(usize::MAX, OperationStatus::Succeeded(None));
        let started = Instant::now();
        let deadline = Deadline::after(Duration::from_secs(35));

        let err = wait_for_completion(&api, pending(), &deadline)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Timeout { after } if after == Duration::from_secs(35)));
        assert_eq!(Instant::now() - started, Duration::from_secs(35));
        // polled at 0s, 10s, 20s and 30s
        assert_eq!(api.polls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_is_cut_at_deadline() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let err = deadline
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, ApiError>(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Timeout { .. }));
    }
}
