use rust_vrbridge_api::{VRError, VRInterface, VRRuntime};

/// Runtime interface handles, cached per runtime generation.
///
/// The runtime may invalidate its interfaces at any time (a restart, for
/// example) and signals it by changing its init token. Every access compares
/// the token first and re-acquires the handles lazily on mismatch.
pub struct VRContext<R: VRRuntime> {
    runtime: R,
    token: u32,
    system: Option<R::System>,
    compositor: Option<R::Compositor>,
    shut_down: bool,
}

impl<R: VRRuntime> VRContext<R> {
    pub fn new(runtime: R, token: u32) -> VRContext<R> {
        VRContext {
            runtime,
            token,
            system: None,
            compositor: None,
            shut_down: false,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn token(&self) -> u32 {
        self.token
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn system(&mut self) -> Result<R::System, VRError> {
        self.check_clear()?;

        if let Some(ref system) = self.system {
            return Ok(system.clone());
        }
        let system = self.runtime.system().map_err(|e| {
            error!("Couldn't get VR {} interface: {}", VRInterface::System.name(), e);
            e
        })?;
        self.system = Some(system.clone());
        Ok(system)
    }

    pub fn compositor(&mut self) -> Result<R::Compositor, VRError> {
        self.check_clear()?;

        if let Some(ref compositor) = self.compositor {
            return Ok(compositor.clone());
        }
        let compositor = self.runtime.compositor().map_err(|e| {
            error!("Couldn't get VR {} interface: {}", VRInterface::Compositor.name(), e);
            e
        })?;
        self.compositor = Some(compositor.clone());
        Ok(compositor)
    }

    pub fn clear(&mut self) {
        self.system = None;
        self.compositor = None;
    }

    // Drops the handles and shuts the runtime down. Safe to call twice.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.clear();
        self.runtime.shutdown();
        self.shut_down = true;
        info!("VR Shutdown");
    }

    fn check_clear(&mut self) -> Result<(), VRError> {
        if self.shut_down {
            return Err(VRError::Unavailable);
        }
        let current = self.runtime.init_token();
        if current != self.token {
            debug!("VR init token changed from {} to {}, re-acquiring interfaces", self.token, current);
            self.clear();
            self.token = current;
        }
        Ok(())
    }
}
