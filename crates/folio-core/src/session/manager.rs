//! The session manager.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::credentials::{Credentials, Registration};
use crate::error::AuthError;
use crate::tokens::{AccessToken, RefreshToken, TokenGrant};
use crate::traits::{AuthService, KeyValueStore};

use super::clock::{Clock, SystemClock};
use super::persist;
use super::state::{Route, Session, SessionState};

/// Buffered navigation signals per subscriber.
const ROUTE_CAPACITY: usize = 16;

/// Owner of the process's authenticated session.
///
/// The manager installs sessions from login, registration and refresh
/// responses, mirrors every change to a [`KeyValueStore`], and keeps exactly
/// one renewal timer armed while a session exists. The timer fires
/// [`RENEWAL_LEAD`](super::RENEWAL_LEAD) before expiry (immediately if the
/// session is already inside that window) and exchanges the refresh token for
/// a new pair. A failed renewal ends the session.
///
/// Cloning is cheap; clones share the same session.
///
/// # Consistency
///
/// State is published as whole [`SessionState`] replacements over a watch
/// channel, so observers never see a token pair without its expiry. Every
/// logout advances an epoch; a network response is applied only if no logout
/// started since its request was sent, so a late response can never resurrect
/// a session that was logged out. A renewal result is further bound to the
/// refresh token it was made with, so it never replaces a newer login.
pub struct SessionManager<A, S> {
    inner: Arc<Inner<A, S>>,
}

struct Inner<A, S> {
    auth: A,
    store: S,
    clock: Box<dyn Clock>,
    state: watch::Sender<SessionState>,
    routes: broadcast::Sender<Route>,
    control: Mutex<Control>,
}

#[derive(Default)]
struct Control {
    hydrated: bool,
    in_flight: usize,
    /// Advanced by every logout.
    epoch: u64,
    /// Renewals past their timer and not yet applied.
    renewing: usize,
    next_timer_id: u64,
    timer: Option<RenewalTimer>,
}

struct RenewalTimer {
    id: u64,
    delay: Duration,
    handle: JoinHandle<()>,
}

impl<A, S> Clone for SessionManager<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, S> Drop for Inner<A, S> {
    fn drop(&mut self) {
        let control = self
            .control
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = control.timer.take() {
            timer.handle.abort();
        }
    }
}

impl<A, S> SessionManager<A, S>
where
    A: AuthService + 'static,
    S: KeyValueStore + 'static,
{
    /// Create a manager that has not read the store yet.
    ///
    /// The state stays `loading` until [`hydrate`](Self::hydrate) runs.
    pub fn new(auth: A, store: S) -> Self {
        Self::with_clock(auth, store, SystemClock)
    }

    pub fn with_clock(auth: A, store: S, clock: impl Clock + 'static) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        let (routes, _) = broadcast::channel(ROUTE_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                auth,
                store,
                clock: Box::new(clock),
                state,
                routes,
                control: Mutex::new(Control::default()),
            }),
        }
    }

    /// Create a manager and hydrate it from the store.
    ///
    /// Must be called inside a Tokio runtime when the store may hold a
    /// session, since restoring one arms the renewal timer.
    pub fn start(auth: A, store: S) -> Self {
        let manager = Self::new(auth, store);
        manager.hydrate();
        manager
    }

    /// Resolve the initial state from the store.
    ///
    /// A complete stored triple becomes the current session; anything partial
    /// or unreadable is purged. Calling this again is a no-op. Returns whether
    /// a session was restored.
    #[instrument(skip(self))]
    pub fn hydrate(&self) -> bool {
        let mut control = self.lock();
        if control.hydrated {
            return self.is_authenticated();
        }
        control.hydrated = true;

        match persist::load(&self.inner.store) {
            Ok(Some(session)) => {
                info!(expires_at = %session.expires_at, "Restored persisted session");
                self.install_locked(&mut control, session, false);
            }
            Ok(None) => debug!("No persisted session"),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted session");
                if let Err(e) = persist::purge(&self.inner.store) {
                    warn!(error = %e, "Failed to purge persisted session");
                }
            }
        }

        publish_loading(&control, &self.inner.state);
        self.is_authenticated()
    }

    /// Sign in with a username and password.
    ///
    /// On failure the error is returned unchanged and any existing session
    /// is left as it was.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let _loading = LoadingGuard::new(&self.inner.control, &self.inner.state);
        let epoch = self.epoch();

        let grant = self
            .inner
            .auth
            .login(credentials)
            .await
            .inspect_err(|e| warn!(error = %e, "Login failed"))?;

        self.accept_grant(epoch, grant)?;
        info!("Logged in");
        Ok(())
    }

    /// Create an account and sign in with the tokens it returns.
    #[instrument(skip(self, profile), fields(username = %profile.username))]
    pub async fn register(&self, profile: &Registration) -> Result<()> {
        let _loading = LoadingGuard::new(&self.inner.control, &self.inner.state);
        let epoch = self.epoch();

        let grant = self
            .inner
            .auth
            .register(profile)
            .await
            .inspect_err(|e| warn!(error = %e, "Registration failed"))?;

        self.accept_grant(epoch, grant)?;
        info!("Registered and logged in");
        Ok(())
    }

    /// End the session.
    ///
    /// The remote revocation is best effort: its failure is logged and the
    /// local session is cleared regardless. Safe to call without a session.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _loading = LoadingGuard::new(&self.inner.control, &self.inner.state);

        let session = {
            let mut control = self.lock();
            // Responses to requests already in flight must not land after this point.
            control.epoch += 1;
            disarm_locked(&mut control);
            self.inner.state.borrow().session.clone()
        };

        if let Some(session) = session {
            match self
                .inner
                .auth
                .logout(&session.access_token, &session.refresh_token)
                .await
            {
                Ok(message) => debug!(%message, "Remote session revoked"),
                Err(e) => warn!(error = %e, "Remote logout failed; clearing local session anyway"),
            }
        }

        {
            let mut control = self.lock();
            self.clear_locked(&mut control);
        }

        info!("Logged out");
        self.navigate(Route::SignIn);
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Observe state replacements.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Observe navigation signals emitted after this call.
    pub fn routes(&self) -> broadcast::Receiver<Route> {
        self.inner.routes.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        self.inner.state.borrow().access_token().cloned()
    }

    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.inner.state.borrow().refresh_token().cloned()
    }

    /// Delay the currently armed renewal timer was armed with, if any.
    pub fn renewal_delay(&self) -> Option<Duration> {
        self.lock().timer.as_ref().map(|t| t.delay)
    }

    /// The access token to put on an API request.
    ///
    /// Inside the renewal window a renewal is due or already running, so this
    /// waits for it to replace or end the session first. The window is judged
    /// by the wall clock: if it has been reached while the timer is still
    /// sleeping (after a clock jump or a suspend), the renewal starts now.
    pub async fn authorized_token(&self) -> Result<AccessToken> {
        let mut rx = self.inner.state.subscribe();

        let stale = {
            // Transitions lock control before touching the state.
            let mut control = self.lock();
            let state = rx.borrow_and_update();
            let session = state.session.as_ref().ok_or(AuthError::NotAuthenticated)?;
            if !session.renewal_delay(self.inner.clock.now()).is_zero() {
                return Ok(session.access_token.clone());
            }
            if control.renewing == 0 {
                let Some(timer) = control.timer.take() else {
                    return Ok(session.access_token.clone());
                };
                timer.handle.abort();
                debug!("Renewal window reached before the timer fired");
                self.spawn_renewal_locked(&mut control);
            }
            session.refresh_token.clone()
        };

        debug!("Waiting for in-flight session renewal");
        let state = rx
            .wait_for(|s| s.refresh_token() != Some(&stale))
            .await
            .map_err(|_| AuthError::NotAuthenticated)?;

        state
            .access_token()
            .cloned()
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    /// Exchange the refresh token for a new pair.
    #[instrument(skip(self))]
    async fn renew(&self) {
        let (epoch, refresh_token) = {
            let control = self.lock();
            let state = self.inner.state.borrow();
            match state.session.as_ref() {
                Some(session) => (control.epoch, session.refresh_token.clone()),
                None => {
                    debug!("No session to renew");
                    return;
                }
            }
        };

        info!("Renewing session");
        let result = self.inner.auth.refresh(&refresh_token).await;

        let mut control = self.lock();
        let current = self.inner.state.borrow().refresh_token().cloned();
        if control.epoch != epoch || current.as_ref() != Some(&refresh_token) {
            debug!("Discarding renewal result for a superseded session");
            return;
        }

        match result {
            Ok(grant) => {
                let session = Session::from_grant(grant, self.inner.clock.now());
                self.install_locked(&mut control, session, true);
                debug!("Session renewed");
            }
            Err(e) => {
                // The refresh token is known bad, so there is nothing to revoke remotely.
                warn!(error = %e, "Session renewal failed; signing out");
                self.clear_locked(&mut control);
                drop(control);
                self.navigate(Route::SignIn);
            }
        }
    }

    fn accept_grant(&self, epoch: u64, grant: TokenGrant) -> Result<()> {
        let mut control = self.lock();
        if control.epoch != epoch {
            warn!("Discarding token grant: logged out while the request was in flight");
            return Err(AuthError::Superseded.into());
        }

        let session = Session::from_grant(grant, self.inner.clock.now());
        self.install_locked(&mut control, session, true);
        drop(control);

        self.navigate(Route::Catalog);
        Ok(())
    }

    fn install_locked(&self, control: &mut Control, session: Session, persist: bool) {
        if persist {
            if let Err(e) = persist::save(&self.inner.store, &session) {
                warn!(error = %e, "Failed to persist session");
            }
        }

        let delay = session.renewal_delay(self.inner.clock.now());
        self.inner.state.send_modify(|state| state.session = Some(session));
        self.arm_locked(control, delay);
    }

    fn clear_locked(&self, control: &mut Control) {
        disarm_locked(control);

        if let Err(e) = persist::purge(&self.inner.store) {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.inner.state.send_if_modified(|state| state.session.take().is_some());
    }

    /// Cancel any armed timer, then arm a new one.
    fn arm_locked(&self, control: &mut Control, delay: Duration) {
        disarm_locked(control);

        control.next_timer_id += 1;
        let id = control.next_timer_id;
        let weak = Arc::downgrade(&self.inner);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let manager = SessionManager { inner };
            if manager.take_fired_timer(id) {
                manager.renew().await;
                manager.lock().renewing -= 1;
            }
        });

        debug!(delay_ms = delay.as_millis() as u64, "Armed session renewal");
        control.timer = Some(RenewalTimer { id, delay, handle });
    }

    /// Renew in the background, counted in `renewing` until applied.
    fn spawn_renewal_locked(&self, control: &mut Control) {
        control.renewing += 1;
        let manager = self.clone();
        tokio::spawn(async move {
            manager.renew().await;
            manager.lock().renewing -= 1;
        });
    }

    /// Detach a timer that has fired so re-arming from inside it does not
    /// abort the running renewal.
    fn take_fired_timer(&self, id: u64) -> bool {
        let mut control = self.lock();
        if control.timer.as_ref().is_some_and(|t| t.id == id) {
            control.timer = None;
            control.renewing += 1;
            true
        } else {
            false
        }
    }

    fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    fn navigate(&self, route: Route) {
        debug!(?route, "Navigating");
        // No subscribers is fine.
        let _ = self.inner.routes.send(route);
    }

    fn lock(&self) -> MutexGuard<'_, Control> {
        lock(&self.inner.control)
    }
}

impl<A, S> std::fmt::Debug for SessionManager<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("SessionManager")
            .field("loading", &state.loading)
            .field("authenticated", &state.authenticated())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

/// Marks an auth operation in flight for as long as it lives.
struct LoadingGuard<'a> {
    control: &'a Mutex<Control>,
    state: &'a watch::Sender<SessionState>,
}

impl<'a> LoadingGuard<'a> {
    fn new(control: &'a Mutex<Control>, state: &'a watch::Sender<SessionState>) -> Self {
        {
            let mut locked = lock(control);
            locked.in_flight += 1;
            publish_loading(&locked, state);
        }
        Self { control, state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut locked = lock(self.control);
        locked.in_flight = locked.in_flight.saturating_sub(1);
        publish_loading(&locked, self.state);
    }
}

fn lock(control: &Mutex<Control>) -> MutexGuard<'_, Control> {
    control.lock().unwrap_or_else(PoisonError::into_inner)
}

fn disarm_locked(control: &mut Control) {
    if let Some(timer) = control.timer.take() {
        timer.handle.abort();
        debug!("Disarmed session renewal");
    }
}

fn publish_loading(control: &Control, state: &watch::Sender<SessionState>) {
    let loading = !control.hydrated || control.in_flight > 0;
    state.send_if_modified(|s| {
        let changed = s.loading != loading;
        s.loading = loading;
        changed
    });
}
