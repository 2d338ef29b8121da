//! Then steps for reply-thread linking BDD scenarios.

use super::world::ThreadWorld;
use palaver::message::domain::Message;
use rstest_bdd_macros::then;

#[then("the parent's child list contains exactly the reply")]
fn child_list_contains_exactly_the_reply(world: &ThreadWorld) -> Result<(), eyre::Report> {
    let parent_id = world
        .parent_id
        .ok_or_else(|| eyre::eyre!("missing parent id in scenario world"))?;
    let reply_id = world
        .reply_id
        .ok_or_else(|| eyre::eyre!("missing reply id in scenario world"))?;

    let children = world
        .repo
        .child_messages(parent_id)
        .map_err(|err| eyre::eyre!("child lookup failed: {err}"))?;
    let child_ids: Vec<_> = children.iter().map(Message::id).collect();
    if child_ids != vec![reply_id] {
        return Err(eyre::eyre!(
            "expected child list [{reply_id}], found {child_ids:?}"
        ));
    }
    Ok(())
}

#[then("the reply is retrievable in its conversation")]
fn reply_retrievable_in_conversation(world: &ThreadWorld) -> Result<(), eyre::Report> {
    let reply_id = world
        .reply_id
        .ok_or_else(|| eyre::eyre!("missing reply id in scenario world"))?;

    let found = world
        .repo
        .message_by_id(reply_id)
        .map_err(|err| eyre::eyre!("id lookup failed: {err}"))?;
    if found.is_none() {
        return Err(eyre::eyre!("expected reply to be retrievable by id"));
    }

    let page = world
        .repo
        .messages_in_conversation(world.conversation_id)
        .map_err(|err| eyre::eyre!("conversation lookup failed: {err}"))?;
    let appearances = page.iter().filter(|m| m.id() == reply_id).count();
    if appearances != 1 {
        return Err(eyre::eyre!(
            "expected reply to appear exactly once in its conversation, found {appearances}"
        ));
    }
    Ok(())
}

#[then("the unknown parent's child list is empty")]
fn unknown_parent_child_list_is_empty(world: &ThreadWorld) -> Result<(), eyre::Report> {
    let parent_id = world
        .parent_id
        .ok_or_else(|| eyre::eyre!("missing parent id in scenario world"))?;

    let children = world
        .repo
        .child_messages(parent_id)
        .map_err(|err| eyre::eyre!("child lookup failed: {err}"))?;
    if !children.is_empty() {
        return Err(eyre::eyre!(
            "expected no children for unknown parent, found {}",
            children.len()
        ));
    }
    Ok(())
}
