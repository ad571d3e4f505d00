// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Memory-mapped I/O device interface
//!
//! Peripherals expose their registers through [`IODevice`]; [`IoBus`] routes
//! physical addresses to the device that claims them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 IoBus                       │
//! ├─────────────────────────────────────────────┤
//! │  devices: Vec<Rc<RefCell<dyn IODevice>>>    │
//! │                                             │
//! │  read32(addr) {                             │
//! │    device.contains(addr)                    │
//! │      → device.read_register(addr - start)   │
//! │  }                                          │
//! └─────────────────────────────────────────────┘
//!           ▲                   ▲
//!           │                   │
//!    ┌──────┴──────┐    ┌──────┴──────┐
//!    │    GPU      │    │    MDEC     │
//!    │ 1F801810h   │    │ 1F801820h   │
//!    └─────────────┘    └─────────────┘
//! ```
//!
//! Register reads take `&mut self`: reading GPUREAD advances a VRAM readback.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use psx_gpu::core::io_device::IoBus;
//! use psx_gpu::core::GPU;
//!
//! let gpu = Rc::new(RefCell::new(GPU::new()));
//! let mut bus = IoBus::new();
//! bus.attach(gpu.clone());
//!
//! bus.write32(0x1F801814, 0x03000000).unwrap(); // GP1(03h): display on
//! let status = bus.read32(0x1F801814).unwrap();
//! assert_eq!(status & (1 << 23), 0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::error::{EmulatorError, Result};

/// A peripheral whose registers sit on the I/O bus
///
/// # Address Translation
///
/// The bus translates physical addresses to device-relative offsets before
/// calling trait methods:
///
/// - Device address range: `0x1F801810 - 0x1F801817`
/// - Physical address: `0x1F801814`
/// - Offset passed to device: `0x04`
///
/// Devices must implement the 32-bit methods. The 8/16-bit defaults extract
/// from or shift into the containing 32-bit register. A narrow write does
/// not preserve the other bytes.
pub trait IODevice {
    /// Physical addresses claimed by the device
    ///
    /// Returns `(start, end)`, both inclusive.
    fn address_range(&self) -> (u32, u32);

    /// Whether `addr` falls inside [`IODevice::address_range`]
    fn contains(&self, addr: u32) -> bool {
        let (start, end) = self.address_range();
        addr >= start && addr <= end
    }

    /// 32-bit register read
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of range for this device.
    fn read_register(&mut self, offset: u32) -> Result<u32>;

    /// 32-bit register write
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of range for this device.
    fn write_register(&mut self, offset: u32, value: u32) -> Result<()>;

    /// 16-bit read, taken from the containing word
    fn read_register16(&mut self, offset: u32) -> Result<u16> {
        let value = self.read_register(offset & !0x03)?;
        let shift = (offset & 0x02) * 8;
        Ok(((value >> shift) & 0xFFFF) as u16)
    }

    /// 16-bit write, shifted into the containing word
    fn write_register16(&mut self, offset: u32, value: u16) -> Result<()> {
        let shift = (offset & 0x02) * 8;
        self.write_register(offset & !0x03, (value as u32) << shift)
    }

    /// 8-bit read, taken from the containing word
    fn read_register8(&mut self, offset: u32) -> Result<u8> {
        let value = self.read_register(offset & !0x03)?;
        let shift = (offset & 0x03) * 8;
        Ok(((value >> shift) & 0xFF) as u8)
    }

    /// 8-bit write, shifted into the containing word
    fn write_register8(&mut self, offset: u32, value: u8) -> Result<()> {
        let shift = (offset & 0x03) * 8;
        self.write_register(offset & !0x03, (value as u32) << shift)
    }

    /// Device name for logging
    fn name(&self) -> &str {
        "Unknown Device"
    }
}

/// Routes physical I/O addresses to attached devices
///
/// Devices are shared with their owner through `Rc<RefCell<_>>`, so the
/// owner can still inspect them (e.g. drain the GPU render list) between
/// bus accesses.
#[derive(Default)]
pub struct IoBus {
    devices: Vec<Rc<RefCell<dyn IODevice>>>,
}

impl IoBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a device; later devices never shadow earlier ones
    pub fn attach(&mut self, device: Rc<RefCell<dyn IODevice>>) {
        {
            let device = device.borrow();
            let (start, end) = device.address_range();
            log::debug!(
                "Attached {} at 0x{:08X}-0x{:08X}",
                device.name(),
                start,
                end
            );
        }
        self.devices.push(device);
    }

    /// Find the device and relative offset for `addr`
    fn route(&self, addr: u32) -> Result<(Rc<RefCell<dyn IODevice>>, u32)> {
        self.devices
            .iter()
            .find(|device| device.borrow().contains(addr))
            .map(|device| {
                let (start, _) = device.borrow().address_range();
                (Rc::clone(device), addr - start)
            })
            .ok_or(EmulatorError::InvalidMemoryAccess { address: addr })
    }

    pub fn read32(&self, addr: u32) -> Result<u32> {
        let (device, offset) = self.route(addr)?;
        let value = device.borrow_mut().read_register(offset)?;
        log::trace!("IO read32 0x{:08X} -> 0x{:08X}", addr, value);
        Ok(value)
    }

    pub fn write32(&self, addr: u32, value: u32) -> Result<()> {
        let (device, offset) = self.route(addr)?;
        log::trace!("IO write32 0x{:08X} <- 0x{:08X}", addr, value);
        let result = device.borrow_mut().write_register(offset, value);
        result
    }

    pub fn read16(&self, addr: u32) -> Result<u16> {
        let (device, offset) = self.route(addr)?;
        let value = device.borrow_mut().read_register16(offset);
        value
    }

    pub fn write16(&self, addr: u32, value: u16) -> Result<()> {
        let (device, offset) = self.route(addr)?;
        let result = device.borrow_mut().write_register16(offset, value);
        result
    }

    pub fn read8(&self, addr: u32) -> Result<u8> {
        let (device, offset) = self.route(addr)?;
        let value = device.borrow_mut().read_register8(offset);
        value
    }

    pub fn write8(&self, addr: u32, value: u8) -> Result<()> {
        let (device, offset) = self.route(addr)?;
        let result = device.borrow_mut().write_register8(offset, value);
        result
    }
}
