//! Synchronous decision channel.
//!
//! Drivers that can answer a shield prompt on the spot implement
//! [`ShieldDecider`] and let `Engine::settle_decisions` drain every
//! pending prompt. Drivers that answer later (a UI waiting on a click)
//! call `Engine::decide_shield` instead.

use super::ShieldPrompt;

/// Produces exactly one answer per prompt: `true` spends the shield.
pub trait ShieldDecider {
    fn decide(&mut self, prompt: &ShieldPrompt) -> bool;
}

impl<F: FnMut(&ShieldPrompt) -> bool> ShieldDecider for F {
    fn decide(&mut self, prompt: &ShieldPrompt) -> bool {
        self(prompt)
    }
}

/// Always spends the shield.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysBlock;

impl ShieldDecider for AlwaysBlock {
    fn decide(&mut self, _prompt: &ShieldPrompt) -> bool {
        true
    }
}

/// Always keeps the shield and takes the hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverBlock;

impl ShieldDecider for NeverBlock {
    fn decide(&mut self, _prompt: &ShieldPrompt) -> bool {
        false
    }
}
