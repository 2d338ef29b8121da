//! When steps for reply-thread linking BDD scenarios.

use super::world::{ThreadWorld, run_async};
use eyre::WrapErr;
use palaver::message::domain::{Message, MessageId, UserId};
use rstest_bdd_macros::when;

#[when("a reply to that message is posted")]
fn reply_to_stored_message(world: &mut ThreadWorld) -> Result<(), eyre::Report> {
    let parent_id = world
        .parent_id
        .ok_or_else(|| eyre::eyre!("missing parent message in scenario world"))?;
    let reply = Message::reply(
        world.conversation_id,
        UserId::new(),
        parent_id,
        "a reply",
        &world.clock,
    )
    .wrap_err("construct reply")?;
    world.reply_id = Some(reply.id());
    run_async(world.repo.insert(reply)).wrap_err("insert reply")?;
    Ok(())
}

#[when("a reply to an unknown parent is posted")]
fn reply_to_unknown_parent(world: &mut ThreadWorld) -> Result<(), eyre::Report> {
    let missing_parent = MessageId::new();
    let reply = Message::reply(
        world.conversation_id,
        UserId::new(),
        missing_parent,
        "orphaned reply",
        &world.clock,
    )
    .wrap_err("construct orphaned reply")?;
    world.parent_id = Some(missing_parent);
    world.reply_id = Some(reply.id());
    run_async(world.repo.insert(reply)).wrap_err("insert orphaned reply")?;
    Ok(())
}

#[when("the board is loaded from the durable store")]
fn load_board_from_durable_store(world: &mut ThreadWorld) -> Result<(), eyre::Report> {
    run_async(world.repo.load()).wrap_err("load board history")?;
    Ok(())
}
