//! Serial driver for low-level hardware communication
//!
//! Provides async line-oriented serial I/O with the switch.

use async_trait::async_trait;
use leoni_core::{PortSummary, Result, SwitchError, BAUD_RATE};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::timeout;
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};
use tracing::{debug, error, warn};

/// Terminator appended to every command
pub const LINE_TERMINATOR: &str = "\r\n";

/// Frame a command for the wire
#[inline]
pub fn frame_command(command: &str) -> String {
    format!("{}{}", command, LINE_TERMINATOR)
}

/// Trait for line transport abstraction
///
/// This trait enables testing of `SwitchController` without real hardware
/// by allowing mock implementations.
#[async_trait]
pub trait LineTransport: Send {
    /// Send a command that has no reply
    async fn send(&mut self, command: &str) -> Result<()>;

    /// Send a command and read one reply line, trimmed
    async fn query(&mut self, command: &str) -> Result<String>;

    /// Release the underlying port. Later calls to `send`/`query` fail with
    /// [`SwitchError::Closed`]; closing twice is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Get the port path, if any
    fn port_path(&self) -> Option<&str>;
}

/// Serial driver for hardware communication
pub struct SerialDriver {
    port: Option<SerialStream>,
    port_path: String,
    timeout_duration: Duration,
    debug_uart: bool,
}

impl SerialDriver {
    /// Open the serial port at the switch baud rate (8N1, no flow control)
    ///
    /// # Arguments
    /// * `port_path` - Path to the serial device (e.g., "/dev/ttyUSB0")
    /// * `timeout_duration` - Timeout applied to each write and line read
    /// * `debug_uart` - Log every line sent and received
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(port_path: &str, timeout_duration: Duration, debug_uart: bool) -> Result<Self> {
        debug!("Opening serial port: {} at {} baud", port_path, BAUD_RATE);

        let port = tokio_serial::new(port_path, BAUD_RATE)
            .timeout(timeout_duration)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| {
                error!("Failed to open serial port {}: {}", port_path, e);
                SwitchError::Serial(format!("Failed to open serial port {}: {}", port_path, e))
            })?;

        debug!("Serial port opened successfully");

        Ok(Self::from_stream(port, port_path, timeout_duration, debug_uart))
    }

    /// Wrap an already configured stream
    pub fn from_stream(
        port: SerialStream,
        port_path: &str,
        timeout_duration: Duration,
        debug_uart: bool,
    ) -> Self {
        if debug_uart {
            debug!("UART debug logging enabled");
        }

        Self {
            port: Some(port),
            port_path: port_path.to_string(),
            timeout_duration,
            debug_uart,
        }
    }

    fn stream(&mut self) -> Result<&mut SerialStream> {
        self.port.as_mut().ok_or(SwitchError::Closed)
    }

    /// Write a framed command and flush it
    async fn write_command(&mut self, command: &str) -> Result<()> {
        let full_command = frame_command(command);
        let timeout_duration = self.timeout_duration;

        if self.debug_uart {
            debug!("TX: {:?}", full_command);
        }

        let port = self.stream()?;

        timeout(timeout_duration, port.write_all(full_command.as_bytes()))
            .await
            .map_err(|_| {
                error!("Write timeout");
                SwitchError::Timeout("Write operation timed out".to_string())
            })?
            .map_err(|e| {
                error!("Write failed: {}", e);
                SwitchError::Serial(format!("Write failed: {}", e))
            })?;

        timeout(timeout_duration, port.flush())
            .await
            .map_err(|_| SwitchError::Timeout("Flush operation timed out".to_string()))?
            .map_err(|e| SwitchError::Serial(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    /// Read a single line and trim it
    async fn read_line(&mut self) -> Result<String> {
        let timeout_duration = self.timeout_duration;
        let debug_uart = self.debug_uart;
        let mut reader = BufReader::new(self.stream()?);
        let mut line = String::new();

        match timeout(timeout_duration, reader.read_line(&mut line)).await {
            Ok(Ok(0)) => {
                warn!("Serial port returned EOF - device may have been disconnected");
                Err(SwitchError::DeviceDisconnected(
                    "Serial port returned EOF - device may have been unplugged".to_string(),
                ))
            }
            Ok(Ok(_)) => {
                let line = line.trim().to_string();
                if debug_uart {
                    debug!("RX: {:?}", line);
                }
                Ok(line)
            }
            Ok(Err(e)) => {
                error!("Read error: {}", e);
                Err(SwitchError::Serial(format!("Read error: {}", e)))
            }
            Err(_) => {
                error!("Read timeout");
                Err(SwitchError::Timeout(format!(
                    "No reply within {:?}",
                    timeout_duration
                )))
            }
        }
    }

    /// Discard stale input so the next line read is the reply
    ///
    /// The flush only fails once the device side is gone, so a failure is
    /// reported as [`SwitchError::DeviceDisconnected`].
    fn clear_input_buffer(&mut self) -> Result<()> {
        self.stream()?
            .clear(tokio_serial::ClearBuffer::Input)
            .map_err(|e| {
                warn!("Failed to clear input buffer: {}", e);
                SwitchError::DeviceDisconnected(format!("Failed to clear input buffer: {}", e))
            })
    }
}

#[async_trait]
impl LineTransport for SerialDriver {
    async fn send(&mut self, command: &str) -> Result<()> {
        self.write_command(command).await
    }

    async fn query(&mut self, command: &str) -> Result<String> {
        self.clear_input_buffer()?;
        self.write_command(command).await?;
        self.read_line().await
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("Closed serial port {}", self.port_path);
        }
        Ok(())
    }

    fn port_path(&self) -> Option<&str> {
        Some(&self.port_path)
    }
}

/// List serial ports on the host
pub fn available_ports() -> Result<Vec<PortSummary>> {
    let ports = tokio_serial::available_ports().map_err(|e| {
        error!("Failed to enumerate serial ports: {}", e);
        SwitchError::Serial(format!("Failed to enumerate ports: {}", e))
    })?;

    let summaries = ports
        .into_iter()
        .map(|port| {
            debug!("Found port: {}", port.port_name);
            match port.port_type {
                tokio_serial::SerialPortType::UsbPort(info) => PortSummary {
                    name: port.port_name,
                    kind: "usb".to_string(),
                    usb_vid: Some(info.vid),
                    usb_pid: Some(info.pid),
                    product: info.product,
                },
                tokio_serial::SerialPortType::PciPort => summary(port.port_name, "pci"),
                tokio_serial::SerialPortType::BluetoothPort => {
                    summary(port.port_name, "bluetooth")
                }
                tokio_serial::SerialPortType::Unknown => summary(port.port_name, "unknown"),
            }
        })
        .collect();

    Ok(summaries)
}

fn summary(name: String, kind: &str) -> PortSummary {
    PortSummary {
        name,
        kind: kind.to_string(),
        usb_vid: None,
        usb_pid: None,
        product: None,
    }
}
