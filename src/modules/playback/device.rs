use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("media is not loaded")]
    NotLoaded,
    #[error("operation not supported: {0}")]
    Unsupported(String),
    #[error("device error: {0}")]
    Failed(String),
}

/// The platform media player a session drives.
#[async_trait]
pub trait MediaDevice: Send + Sync {
    async fn is_loaded(&self) -> Result<bool, DeviceError>;
    async fn play(&self) -> Result<(), DeviceError>;
    async fn pause(&self) -> Result<(), DeviceError>;
    async fn unload(&self) -> Result<(), DeviceError>;
}

/// Screen orientation control. Only meaningful on native platforms.
#[async_trait]
pub trait OrientationLock: Send + Sync {
    async fn lock_landscape(&self) -> Result<(), DeviceError>;
    async fn unlock(&self) -> Result<(), DeviceError>;
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCommand {
    Play,
    Pause,
    Unload,
    LockLandscape,
    Unlock,
}

/// Stand-in for a player and orientation lock that live on the client.
/// Commands are queued for the client to apply; the loaded flag mirrors
/// what the client last reported.
#[derive(Debug, Default)]
pub struct RemoteDevice {
    loaded: AtomicBool,
    commands: Mutex<Vec<DeviceCommand>>,
}

impl RemoteDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::SeqCst);
    }

    fn push(&self, command: DeviceCommand) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }

    /// Commands issued since the last drain, oldest first.
    pub fn drain_commands(&self) -> Vec<DeviceCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl MediaDevice for RemoteDevice {
    async fn is_loaded(&self) -> Result<bool, DeviceError> {
        Ok(self.loaded.load(Ordering::SeqCst))
    }

    async fn play(&self) -> Result<(), DeviceError> {
        if !self.loaded.load(Ordering::SeqCst) {
            return Err(DeviceError::NotLoaded);
        }
        self.push(DeviceCommand::Play);
        Ok(())
    }

    async fn pause(&self) -> Result<(), DeviceError> {
        if !self.loaded.load(Ordering::SeqCst) {
            return Err(DeviceError::NotLoaded);
        }
        self.push(DeviceCommand::Pause);
        Ok(())
    }

    async fn unload(&self) -> Result<(), DeviceError> {
        self.loaded.store(false, Ordering::SeqCst);
        self.push(DeviceCommand::Unload);
        Ok(())
    }
}

#[async_trait]
impl OrientationLock for RemoteDevice {
    async fn lock_landscape(&self) -> Result<(), DeviceError> {
        self.push(DeviceCommand::LockLandscape);
        Ok(())
    }

    async fn unlock(&self) -> Result<(), DeviceError> {
        self.push(DeviceCommand::Unlock);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_queue_until_drained() {
        let device = RemoteDevice::new();
        assert!(matches!(device.play().await, Err(DeviceError::NotLoaded)));

        device.report_loaded(true);
        device.play().await.unwrap();
        device.lock_landscape().await.unwrap();
        device.unload().await.unwrap();

        assert_eq!(
            device.drain_commands(),
            vec![DeviceCommand::Play, DeviceCommand::LockLandscape, DeviceCommand::Unload]
        );
        assert!(device.drain_commands().is_empty());
        assert!(!device.is_loaded().await.unwrap());
    }
}
