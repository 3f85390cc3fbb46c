use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// 第一個成功的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner<T> {
    pub index: usize,
    pub value: T,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceError<E> {
    /// 所有操作都失敗，錯誤依操作順序排列
    Exhausted(Vec<E>),
    /// 截止時間到了仍沒有成功者，附上已收到的失敗
    DeadlineElapsed { failures: Vec<E> },
}

/// 同時啟動所有操作，回傳第一個 `Ok`；其餘操作被放棄，不會被等待。
///
/// 每個操作在自己的 tokio task 中執行，完成後把結果送進容量等於操作數的 channel，
/// 所以決定之後才完成的操作送出時不會阻塞，只會因接收端已關閉而被丟棄。
/// 回傳 `None` 的操作視為沒有回應：不算失敗，只要有一個操作沒有回應，
/// 就只能以成功或截止時間結束，不會回傳 `Exhausted`。
pub async fn race_first_ok<T, E, F>(
    ops: Vec<F>,
    deadline: Duration,
) -> Result<Winner<T>, RaceError<E>>
where
    F: Future<Output = Option<Result<T, E>>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let total = ops.len();
    if total == 0 {
        return Err(RaceError::Exhausted(Vec::new()));
    }

    let started = Instant::now();
    let (tx, mut rx) = mpsc::channel(total);

    for (index, op) in ops.into_iter().enumerate() {
        let tx = tx.clone();
        tokio::spawn(async move {
            let Some(result) = op.await else {
                tracing::debug!(index, "Operation gave no response");
                return;
            };
            if tx.send((index, result)).await.is_err() {
                tracing::debug!(index, "Race already decided, discarding late outcome");
            }
        });
    }
    drop(tx);

    let mut failures: Vec<(usize, E)> = Vec::with_capacity(total);
    let first_ok = async {
        while let Some((index, result)) = rx.recv().await {
            match result {
                Ok(value) => return Some((index, value)),
                Err(error) => failures.push((index, error)),
            }
        }
        // channel 已關閉但有操作沒有回應，等到截止時間
        if failures.len() < total {
            std::future::pending::<()>().await;
        }
        None
    };

    let decision = tokio::time::timeout(deadline, first_ok).await;
    match decision {
        Ok(Some((index, value))) => Ok(Winner {
            index,
            value,
            elapsed: started.elapsed(),
        }),
        Ok(None) => Err(RaceError::Exhausted(in_op_order(failures))),
        Err(_) => Err(RaceError::DeadlineElapsed {
            failures: in_op_order(failures),
        }),
    }
}

fn in_op_order<E>(mut failures: Vec<(usize, E)>) -> Vec<E> {
    failures.sort_by_key(|(index, _)| *index);
    failures.into_iter().map(|(_, error)| error).collect()
}
