//! Given steps for reply-thread linking BDD scenarios.

use std::sync::Arc;

use super::world::{ThreadWorld, run_async};
use eyre::WrapErr;
use palaver::message::{
    adapters::memory::InMemoryDurableStore,
    domain::{Message, UserId},
    repository::MessageRepository,
};
use rstest_bdd_macros::given;

#[given("a stored top-level message")]
fn stored_top_level_message(world: &mut ThreadWorld) -> Result<(), eyre::Report> {
    let message = Message::new(
        world.conversation_id,
        UserId::new(),
        "top-level post",
        &world.clock,
    )
    .wrap_err("construct top-level message")?;
    world.parent_id = Some(message.id());
    run_async(world.repo.insert(message)).wrap_err("insert top-level message")?;
    Ok(())
}

#[given("an empty message board")]
fn empty_message_board(world: &mut ThreadWorld) {
    debug_assert!(world.repo.is_empty());
}

#[given("a persisted history where a reply precedes its parent")]
fn history_with_reply_before_parent(world: &mut ThreadWorld) -> Result<(), eyre::Report> {
    let author_id = UserId::new();
    let parent = Message::new(world.conversation_id, author_id, "parent", &world.clock)
        .wrap_err("construct parent")?;
    let reply = Message::reply(
        world.conversation_id,
        author_id,
        parent.id(),
        "reply",
        &world.clock,
    )
    .wrap_err("construct reply")?;

    world.parent_id = Some(parent.id());
    world.reply_id = Some(reply.id());
    world.store = InMemoryDurableStore::seeded(vec![reply, parent]);
    world.repo = MessageRepository::new(Arc::new(world.store.clone()));
    Ok(())
}
