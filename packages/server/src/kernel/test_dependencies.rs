// Mock implementations of the kernel traits for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{BaseImageStorage, BaseNotificationService, HouseInviteNotice};
use crate::domains::houses::models::ImageUpload;

// =============================================================================
// Mock Notification Service
// =============================================================================

/// Records every notice it is asked to send; can be switched into failure mode.
#[derive(Clone, Default)]
pub struct MockNotificationService {
    sent: Arc<Mutex<Vec<HouseInviteNotice>>>,
    fail: Arc<AtomicBool>,
}

impl MockNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose every delivery fails (after recording the attempt)
    pub fn failing() -> Self {
        let service = Self::default();
        service.fail.store(true, Ordering::SeqCst);
        service
    }

    pub fn sent(&self) -> Vec<HouseInviteNotice> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseNotificationService for MockNotificationService {
    async fn send_house_invite_notice(&self, notice: &HouseInviteNotice) -> Result<()> {
        self.sent.lock().unwrap().push(notice.clone());

        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("mock delivery failure");
        }
        Ok(())
    }
}

// =============================================================================
// Mock Image Storage
// =============================================================================

#[derive(Clone, Default)]
pub struct MockImageStorage {
    stored: Arc<Mutex<Vec<ImageUpload>>>,
}

impl MockImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseImageStorage for MockImageStorage {
    async fn store(&self, upload: &ImageUpload) -> Result<String> {
        let mut stored = self.stored.lock().unwrap();
        stored.push(upload.clone());
        Ok(format!("avatars/mock-{}.{}", stored.len(), upload.extension()))
    }
}
