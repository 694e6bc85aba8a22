use chrono::{DateTime, Utc};
use log::debug;

use crate::models::{Activity, ChargeNumber};
use crate::utils::validation::{ModelError, ModelResult};

/// Observer of time card state transitions.
///
/// Callbacks run synchronously on the calling thread before the mutating
/// call returns.
#[cfg_attr(test, mockall::automock)]
pub trait TimeCardListener {
    fn on_activity_started(&mut self, time_card: &TimeCard, activity: &Activity);

    fn on_activity_stopped(&mut self, time_card: &TimeCard, activity: &Activity);

    fn on_reset(&mut self, time_card: &TimeCard);
}

/// The chronological history of activities for one tracked user.
///
/// Only the last activity may be active; every earlier one is stopped.
#[derive(Default)]
pub struct TimeCard {
    activities: Vec<Activity>,
    listener: Option<Box<dyn TimeCardListener>>,
}

impl std::fmt::Debug for TimeCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeCard")
            .field("activities", &self.activities)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl TimeCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `InvalidState` when the time card is inactive.
    pub fn active_activity(&self) -> ModelResult<&Activity> {
        self.activities
            .last()
            .filter(|activity| activity.is_active())
            .ok_or_else(|| ModelError::invalid_state("no active activity"))
    }

    /// A copy of all activities in chronological order; the active activity,
    /// if any, is last.
    pub fn activities(&self) -> Vec<Activity> {
        self.activities.clone()
    }

    pub fn inactive_activities(&self) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|activity| !activity.is_active())
            .cloned()
            .collect()
    }

    pub fn is_active(&self) -> bool {
        self.active_activity().is_ok()
    }

    /// Discards every activity, including an active one, without stopping it.
    pub fn reset(&mut self) {
        debug!("Resetting time card with {} activities", self.activities.len());
        self.activities.clear();

        self.notify(|listener, time_card| listener.on_reset(time_card));
    }

    /// Replaces the current listener; `None` removes it.
    pub fn set_listener(&mut self, listener: Option<Box<dyn TimeCardListener>>) {
        self.listener = listener;
    }

    /// Starts a new activity, first stopping the active one at `start_time`.
    ///
    /// Fails with `InvalidArgument` if `start_time` precedes the active
    /// activity's start time; the new activity is not started in that case.
    pub fn start_activity(
        &mut self,
        charge_number: ChargeNumber,
        start_time: DateTime<Utc>,
    ) -> ModelResult<()> {
        if self.is_active() {
            self.stop_active_activity(start_time)?;
        }

        debug!("Starting activity for {} at {}", charge_number, start_time);
        self.activities.push(Activity::start(charge_number, start_time));

        let index = self.activities.len() - 1;
        self.notify(|listener, time_card| {
            listener.on_activity_started(time_card, &time_card.activities[index])
        });

        Ok(())
    }

    /// Fails with `InvalidState` if the time card is inactive, or
    /// `InvalidArgument` if `stop_time` precedes the active activity's start.
    pub fn stop_active_activity(&mut self, stop_time: DateTime<Utc>) -> ModelResult<()> {
        if !self.is_active() {
            return Err(ModelError::invalid_state("no active activity"));
        }

        let index = self.activities.len() - 1;
        self.activities[index].stop(stop_time)?;
        debug!(
            "Stopped activity for {} at {}",
            self.activities[index].charge_number(),
            stop_time
        );

        self.notify(|listener, time_card| {
            listener.on_activity_stopped(time_card, &time_card.activities[index])
        });

        Ok(())
    }

    fn notify<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut dyn TimeCardListener, &TimeCard),
    {
        if let Some(mut listener) = self.listener.take() {
            callback(listener.as_mut(), self);
            self.listener = Some(listener);
        }
    }
}
