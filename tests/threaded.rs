use std::sync::Arc;
use std::thread;

use ruletrie::{Context, FunctionRegistry, Predicate, Rule, RuleTrie, field};

#[test]
fn match_across_threads() {
    let adult = Predicate::new(field("user.age").gte(18_i64));
    let active = Predicate::new(field("user.status").eq("active"));
    let banned = Predicate::new(field("user.banned").eq(true));

    let trie = Arc::new(RuleTrie::build(vec![
        Rule::new([banned], "deny").with_priority(0),
        Rule::new([adult, active], "allow").with_priority(10),
    ]));
    let functions = Arc::new(FunctionRegistry::with_builtins());

    let mut handles = vec![];

    // Thread 1: adult, active, not banned -> allow
    let t = Arc::clone(&trie);
    let f = Arc::clone(&functions);
    handles.push(thread::spawn(move || {
        let ctx = Context::new()
            .set("user.age", 25_i64)
            .set("user.status", "active")
            .set("user.banned", false);
        t.first_match(&ctx, &f).unwrap().map(|r| *r.consequence())
    }));

    // Thread 2: banned -> deny wins on priority
    let t = Arc::clone(&trie);
    let f = Arc::clone(&functions);
    handles.push(thread::spawn(move || {
        let ctx = Context::new()
            .set("user.age", 30_i64)
            .set("user.status", "active")
            .set("user.banned", true);
        t.first_match(&ctx, &f).unwrap().map(|r| *r.consequence())
    }));

    // Thread 3: underage, not banned -> no match
    let t = Arc::clone(&trie);
    let f = Arc::clone(&functions);
    handles.push(thread::spawn(move || {
        let ctx = Context::new()
            .set("user.age", 15_i64)
            .set("user.status", "active")
            .set("user.banned", false);
        t.first_match(&ctx, &f).unwrap().map(|r| *r.consequence())
    }));

    // Thread 4: inactive account -> no match
    let t = Arc::clone(&trie);
    let f = Arc::clone(&functions);
    handles.push(thread::spawn(move || {
        let ctx = Context::new()
            .set("user.age", 25_i64)
            .set("user.status", "inactive")
            .set("user.banned", false);
        t.first_match(&ctx, &f).unwrap().map(|r| *r.consequence())
    }));

    let results: Vec<Option<&str>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], Some("allow"));
    assert_eq!(results[1], Some("deny"));
    assert_eq!(results[2], None);
    assert_eq!(results[3], None);
}
