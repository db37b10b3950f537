//! Switch Controller - High-level interface for channel selection
//!
//! Implements the Leoni switch text protocol over a [`LineTransport`], or
//! answers from an in-memory simulator when no hardware is attached.

use crate::serial_driver::{LineTransport, SerialDriver};
use async_trait::async_trait;
use leoni_core::{
    Channel, Result, SwitchConfig, SwitchError, SwitchInfo, SwitchStatus, SIMULATOR_FIRMWARE,
};
use tracing::{debug, info};

/// Commands understood by the switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Query model and channel count (`type?`)
    TypeQuery,
    /// Query the active channel (`ch?`)
    ChannelQuery,
    /// Select a channel (`chN`), no reply
    SetChannel(u32),
    /// Query the firmware revision (`firmware?`)
    FirmwareQuery,
}

impl Command {
    /// Command text, without line terminator
    pub fn wire(&self) -> String {
        match self {
            Command::TypeQuery => "type?".to_string(),
            Command::ChannelQuery => "ch?".to_string(),
            Command::SetChannel(channel) => format!("ch{}", channel),
            Command::FirmwareQuery => "firmware?".to_string(),
        }
    }
}

/// One way of answering switch operations
///
/// [`LiveSwitch`] talks to hardware, [`SimulatedSwitch`] answers canned
/// values. The controller picks one at construction.
#[async_trait]
pub trait SwitchBackend: Send {
    /// Model and channel count, resolved once and cached
    async fn info(&mut self) -> Result<SwitchInfo>;

    /// Select an already validated channel
    async fn select_channel(&mut self, channel: Channel) -> Result<()>;

    /// Currently active channel
    async fn active_channel(&mut self) -> Result<u32>;

    /// Firmware revision string
    async fn firmware_revision(&mut self) -> Result<String>;

    /// Release any transport held by the backend
    fn close(&mut self) -> Result<()>;

    /// Whether this backend is the simulator
    fn is_simulated(&self) -> bool;

    /// Port the backend talks to, if any
    fn port_path(&self) -> Option<&str>;
}

/// In-memory substitute for the hardware
///
/// Reports 7 channels and the simulator firmware string. Channel selection
/// is accepted but not remembered: the active channel always reads as 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedSwitch;

#[async_trait]
impl SwitchBackend for SimulatedSwitch {
    async fn info(&mut self) -> Result<SwitchInfo> {
        Ok(SwitchInfo::simulated())
    }

    async fn select_channel(&mut self, channel: Channel) -> Result<()> {
        debug!("Simulated switch: select channel {}", channel);
        Ok(())
    }

    async fn active_channel(&mut self) -> Result<u32> {
        Ok(1)
    }

    async fn firmware_revision(&mut self) -> Result<String> {
        Ok(SIMULATOR_FIRMWARE.to_string())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn port_path(&self) -> Option<&str> {
        None
    }
}

/// Switch reached through a line transport
pub struct LiveSwitch<T: LineTransport> {
    transport: T,
    info: Option<SwitchInfo>,
    closed: bool,
}

impl<T: LineTransport> LiveSwitch<T> {
    /// Wrap a transport; nothing is sent until the first operation
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            info: None,
            closed: false,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(SwitchError::Closed);
        }
        Ok(())
    }

    async fn query(&mut self, cmd: Command) -> Result<String> {
        self.ensure_open()?;
        debug!("Sending command: {:?} ({})", cmd, cmd.wire());
        let reply = self.transport.query(&cmd.wire()).await?;
        debug!("Reply to {:?}: {:?}", cmd, reply);
        Ok(reply)
    }
}

#[async_trait]
impl<T: LineTransport> SwitchBackend for LiveSwitch<T> {
    async fn info(&mut self) -> Result<SwitchInfo> {
        self.ensure_open()?;
        if let Some(info) = self.info {
            return Ok(info);
        }

        let reply = self.query(Command::TypeQuery).await?;
        let info = SwitchInfo::from_type_reply(&reply)?;
        debug!(
            "Resolved switch type: {} with {} channels",
            info.model, info.channel_count
        );
        self.info = Some(info);
        Ok(info)
    }

    async fn select_channel(&mut self, channel: Channel) -> Result<()> {
        self.ensure_open()?;
        let cmd = Command::SetChannel(channel.get());
        debug!("Sending command: {:?} ({})", cmd, cmd.wire());
        self.transport.send(&cmd.wire()).await
    }

    async fn active_channel(&mut self) -> Result<u32> {
        let reply = self.query(Command::ChannelQuery).await?;
        reply.trim().parse::<u32>().map_err(|e| {
            SwitchError::Parse(format!("Invalid active channel reply '{}': {}", reply, e))
        })
    }

    async fn firmware_revision(&mut self) -> Result<String> {
        let reply = self.query(Command::FirmwareQuery).await?;
        Ok(reply.trim().to_string())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.transport.close()
    }

    fn is_simulated(&self) -> bool {
        false
    }

    fn port_path(&self) -> Option<&str> {
        self.transport.port_path()
    }
}

/// Switch controller interface
///
/// Owns one backend for its whole life. Operations take `&mut self`, so a
/// controller shared between tasks needs external locking.
pub struct SwitchController {
    backend: Box<dyn SwitchBackend>,
}

impl SwitchController {
    /// Open a switch as described by `config`
    ///
    /// In simulation mode no port is opened. Otherwise the serial port is
    /// opened and the channel count is resolved immediately, so a switch
    /// that does not answer `type?` within the timeout fails here.
    pub async fn open(config: &SwitchConfig) -> Result<Self> {
        config.validate()?;
        if config.simulation {
            info!("Using simulated switch");
            return Ok(Self::simulated());
        }

        info!("Connecting to switch at {}...", config.port);
        let driver = SerialDriver::open(&config.port, config.timeout(), config.debug_uart)?;
        Self::with_transport(driver).await
    }

    /// Controller backed by the simulator
    pub fn simulated() -> Self {
        Self::from_backend(Box::new(SimulatedSwitch))
    }

    /// Live controller over any transport
    ///
    /// Resolves the channel count before returning, like [`Self::open`].
    pub async fn with_transport<T: LineTransport + 'static>(transport: T) -> Result<Self> {
        let mut backend = LiveSwitch::new(transport);
        let info = backend.info().await?;
        info!(
            "Connected to {} with {} channels",
            info.model, info.channel_count
        );
        Ok(Self::from_backend(Box::new(backend)))
    }

    /// Controller over a caller-supplied backend
    pub fn from_backend(backend: Box<dyn SwitchBackend>) -> Self {
        Self { backend }
    }

    /// Model and channel count
    pub async fn info(&mut self) -> Result<SwitchInfo> {
        self.backend.info().await
    }

    /// Number of selectable channels
    pub async fn channel_count(&mut self) -> Result<u32> {
        Ok(self.backend.info().await?.channel_count)
    }

    /// Select a channel in [1, channel_count]
    ///
    /// The switch does not acknowledge the selection; only the argument is
    /// checked.
    pub async fn set_active_channel(&mut self, channel: u32) -> Result<()> {
        let count = self.channel_count().await?;
        let channel = Channel::new(channel).validate(count)?;
        self.backend.select_channel(channel).await
    }

    /// Select a channel given as text and return the channel sent
    ///
    /// Non-integer text fails with [`SwitchError::InvalidChannel`] before
    /// the range is considered. `"+03"` selects channel 3.
    pub async fn set_active_channel_str(&mut self, raw: &str) -> Result<Channel> {
        let count = self.channel_count().await?;
        let channel = Channel::parse(raw, count)?;
        self.backend.select_channel(channel).await?;
        Ok(channel)
    }

    /// Currently active channel, read from the switch on every call
    pub async fn active_channel(&mut self) -> Result<u32> {
        self.backend.active_channel().await
    }

    /// Firmware revision string, such as "v8.09"
    pub async fn firmware_revision(&mut self) -> Result<String> {
        self.backend.firmware_revision().await
    }

    /// Check the controller, not the serial link
    ///
    /// Returns `true` when the channel count is non-zero. The count is
    /// cached after construction, so this does no I/O on a live switch.
    pub async fn ping(&mut self) -> Result<bool> {
        Ok(self.channel_count().await? != 0)
    }

    /// Gather count, active channel and firmware in one snapshot
    pub async fn status(&mut self) -> Result<SwitchStatus> {
        let channel_count = self.channel_count().await?;
        let active_channel = self.active_channel().await?;
        let firmware = self.firmware_revision().await?;

        Ok(SwitchStatus {
            port: self.port().map(str::to_string),
            simulated: self.is_simulated(),
            channel_count,
            active_channel,
            firmware,
        })
    }

    /// Release the transport
    ///
    /// Closing twice is a no-op. Every other operation on a closed live
    /// controller fails with [`SwitchError::Closed`].
    pub fn close(&mut self) -> Result<()> {
        debug!("Closing switch controller");
        self.backend.close()
    }

    /// Whether the simulator answers
    pub fn is_simulated(&self) -> bool {
        self.backend.is_simulated()
    }

    /// Serial port in use, if any
    pub fn port(&self) -> Option<&str> {
        self.backend.port_path()
    }
}
