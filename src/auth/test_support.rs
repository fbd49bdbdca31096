//! 单元测试用的元数据探测替身

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::metadata::{InstanceIdentity, InstanceMetadataProbe};

/// 可控的元数据探测：记录调用次数，可模拟非 OCI 环境与慢探测
#[derive(Debug, Default)]
pub struct FakeProbe {
    identity: Mutex<Option<InstanceIdentity>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl FakeProbe {
    pub fn on_instance(region: &str) -> Self {
        let probe = Self::default();
        probe.set_region(region);
        probe
    }

    pub fn off_platform() -> Self {
        Self::default()
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_region(&self, region: &str) {
        *self.identity.lock().unwrap() = Some(InstanceIdentity {
            instance_id: format!("ocid1.instance.oc1.{region}.test"),
            compartment_id: "ocid1.compartment.oc1..test".to_string(),
            region: region.to_string(),
        });
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InstanceMetadataProbe for FakeProbe {
    async fn instance_identity(&self) -> anyhow::Result<InstanceIdentity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let identity = self.identity.lock().unwrap().clone();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        identity.ok_or_else(|| anyhow::anyhow!("connect timeout to 169.254.169.254"))
    }
}
