//! Ordered collection of the actors in the current match
//!
//! Insertion order is the sweep order. The registry is only mutated through
//! `&mut self`, so nothing can observe it half-changed while a sweep holds
//! the actor slice. Changes wanted during a tick go through
//! [`RegistryCommand`] and are applied once the tick is finished.

/// A structural change to apply after the current tick
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryCommand<A> {
    Add(A),
    Clear,
}

#[derive(Debug, Clone)]
pub struct ActorRegistry<A> {
    actors: Vec<A>,
}

impl<A> Default for ActorRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ActorRegistry<A> {
    pub fn new() -> Self {
        Self { actors: Vec::new() }
    }

    pub fn add(&mut self, actor: A) {
        self.actors.push(actor);
    }

    pub fn add_range<I>(&mut self, actors: I)
    where
        I: IntoIterator<Item = A>,
    {
        self.actors.extend(actors);
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }

    /// Apply queued commands in order
    pub fn apply<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = RegistryCommand<A>>,
    {
        for command in commands {
            match command {
                RegistryCommand::Add(actor) => self.add(actor),
                RegistryCommand::Clear => self.clear(),
            }
        }
    }

    pub fn all(&self) -> &[A] {
        &self.actors
    }

    pub fn all_mut(&mut self) -> &mut [A] {
        &mut self.actors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.actors.iter()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl<'a, A> IntoIterator for &'a ActorRegistry<A> {
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
