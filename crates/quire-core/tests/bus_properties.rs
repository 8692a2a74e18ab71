//! Dispatch guarantees of the command and query buses.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use quire_adapters::{InMemoryArticleStore, StubAuthorDirectory};
use quire_core::prelude::*;

#[test]
fn registered_handler_runs_exactly_once_and_its_result_is_returned() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let queries = QueryBus::builder()
        .register::<ListArticles, _>(move |_: ListArticles| -> QuireResult<Vec<Article>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        })
        .unwrap()
        .build();

    let result = queries.dispatch(ListArticles).unwrap();

    assert!(result.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_handler_is_reported_not_ignored() {
    let queries = QueryBus::builder().build();

    let err = queries.dispatch(ListArticles).unwrap_err();

    assert!(err.is_configuration());
    assert!(matches!(err, DispatchError::NoHandler { .. }));
    assert!(err.to_string().contains("ListArticles"));
}

#[test]
fn same_query_twice_gives_equal_results() {
    let store = InMemoryArticleStore::new();
    let buses = ArticleBuses::wire(
        Arc::new(store.clone()),
        Arc::new(StubAuthorDirectory::new()),
    )
    .unwrap();
    let created = buses
        .create(CreateArticle::new(Some("t"), Some("c"), Some("a")).unwrap())
        .unwrap();
    let query = GetArticle::new(Some(&created.id.to_string())).unwrap();

    let first = buses.get(query.clone());
    let second = buses.get(query);

    assert_eq!(first, second);
    assert_eq!(first.unwrap(), created);
}

#[test]
fn concurrent_dispatch_against_one_store() {
    let store = InMemoryArticleStore::new();
    let buses = ArticleBuses::wire(
        Arc::new(store.clone()),
        Arc::new(StubAuthorDirectory::new()),
    )
    .unwrap();

    thread::scope(|scope| {
        for worker in 0..8 {
            let buses = &buses;
            scope.spawn(move || {
                for n in 0..25 {
                    let title = format!("worker {worker} article {n}");
                    buses
                        .create(CreateArticle::new(Some(&title), Some("c"), Some("a")).unwrap())
                        .unwrap();
                    buses.list().unwrap();
                }
            });
        }
    });

    assert_eq!(store.len().unwrap(), 200);
    assert_eq!(buses.list().unwrap().len(), 200);
}

#[test]
fn duplicate_registration_fails_at_startup() {
    let result = CommandBus::builder()
        .register::<DeleteArticle, _>(|c: DeleteArticle| -> QuireResult<ArticleId> {
            ArticleId::parse(c.id()).map_err(Into::into)
        })
        .unwrap()
        .register::<DeleteArticle, _>(|_: DeleteArticle| -> QuireResult<ArticleId> {
            Ok(ArticleId::new())
        });

    assert!(matches!(
        result,
        Err(RegistrationError::DuplicateHandler { .. })
    ));
}
