//! # Trigger Pipeline
//!
//! One activation of the random trigger runs
//! `ContextResolver → Sampler → Navigation Composer` against the location the
//! host reports, then either navigates the host or reports the failure to it.
//!
//! How the trigger control is kept present in the host UI is the host's
//! business; the pipeline only asks for `ensure_present` once per activation.

use crate::client::CollectionClient;
use crate::context::{ContextResolver, Intent};
use crate::location::Location;
use crate::navigation::{NavigationTarget, compose, compose_marker};
use crate::primitives::MARKER_PAGE_SIZE;
use crate::random::RandomSource;
use crate::sampler::Sampler;
use crate::types::RandomError;

/// The UI side of the trigger.
pub trait TriggerHost {
    /// Make sure exactly one trigger control is available. Idempotent.
    fn ensure_present(&mut self);

    /// Current location of the host.
    fn location(&self) -> Result<Location, RandomError>;

    /// Replace the current location with `target`.
    fn navigate(&mut self, target: &NavigationTarget);

    /// Show a blocking failure message.
    fn report(&mut self, error: &RandomError);
}

/// Resolver, sampler and composer wired together.
#[derive(Debug)]
pub struct Randomizer<C, R> {
    client: C,
    random: R,
    resolver: ContextResolver,
    marker_page_size: u32,
}

impl<C: CollectionClient, R: RandomSource> Randomizer<C, R> {
    /// Create a pipeline with the default marker page size.
    #[must_use]
    pub fn new(client: C, random: R, resolver: ContextResolver) -> Self {
        Self {
            client,
            random,
            resolver,
            marker_page_size: MARKER_PAGE_SIZE,
        }
    }

    /// Override the page size of the marker enumeration.
    #[must_use]
    pub fn with_marker_page_size(mut self, page_size: u32) -> Self {
        self.marker_page_size = page_size.max(1);
        self
    }

    /// The resolver in use.
    #[must_use]
    pub fn resolver(&self) -> &ContextResolver {
        &self.resolver
    }

    /// The collection client in use.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one cycle from `location` to a destination.
    pub async fn run(&self, location: &Location) -> Result<NavigationTarget, RandomError> {
        let sampler = Sampler::new(&self.client, &self.random);
        match self.resolver.resolve(location) {
            Intent::RandomMarker => {
                let pick = sampler.random_marker(self.marker_page_size).await?;
                Ok(compose_marker(&pick.scene_id, pick.seconds))
            }
            Intent::Sample(intent) => {
                let result = sampler
                    .sample(intent.kind, &intent.filter, intent.per_page)
                    .await?;
                Ok(compose(&result, intent.kind, &intent.playlist))
            }
        }
    }

    /// Handle one activation of the trigger on `host`.
    ///
    /// The host is navigated only after a fully successful cycle; any failure
    /// is reported and leaves the host where it was.
    pub async fn activate<H: TriggerHost>(
        &self,
        host: &mut H,
    ) -> Result<NavigationTarget, RandomError> {
        host.ensure_present();
        let outcome = match host.location() {
            Ok(location) => self.run(&location).await,
            Err(e) => Err(e),
        };
        match &outcome {
            Ok(target) => host.navigate(target),
            Err(e) => host.report(e),
        }
        outcome
    }
}
