//! Keyed in-flight guard used against double submission.

use std::time::Duration;

use craftlink_backend::guard::{Busy, OperationGuard, keys};
use uuid::Uuid;

#[tokio::test]
async fn test_second_attempt_on_busy_key_is_rejected() {
    let guard = OperationGuard::new(Duration::from_secs(30));
    let key = keys::rating(Uuid::new_v4(), Uuid::new_v4());
    let (release, wait) = tokio::sync::oneshot::channel::<()>();

    let first = {
        let guard = guard.clone();
        let key = key.clone();
        tokio::spawn(async move {
            guard
                .run(key, async {
                    wait.await.ok();
                    1
                })
                .await
        })
    };

    for _ in 0..100 {
        if guard.is_busy(&key).await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(guard.is_busy(&key).await);

    assert_eq!(
        guard.run(key.clone(), async { 2 }).await,
        Err(Busy { key: key.clone() })
    );

    release.send(()).unwrap();
    assert_eq!(first.await.unwrap(), Ok(1));

    // Released once the first attempt finished.
    assert!(!guard.is_busy(&key).await);
    assert_eq!(guard.run(key, async { 3 }).await, Ok(3));
}

#[tokio::test]
async fn test_different_keys_do_not_block_each_other() {
    let guard = OperationGuard::new(Duration::from_secs(30));
    let creator = Uuid::new_v4();

    let a = guard.run(keys::rating(creator, Uuid::new_v4()), async { "a" });
    let b = guard.run(keys::rating(creator, Uuid::new_v4()), async { "b" });
    let (a, b) = tokio::join!(a, b);

    assert_eq!(a, Ok("a"));
    assert_eq!(b, Ok("b"));
}

#[test]
fn test_keys_are_scoped_per_operation() {
    let user = Uuid::new_v4();
    let project = Uuid::new_v4();

    assert_eq!(keys::claim(project, user), format!("claim:{project}:{user}"));
    assert_ne!(keys::portfolio(user), keys::new_project(user));
}
