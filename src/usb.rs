//! USB vendor-request dispatcher
//!
//! The low-level USB driver hands over raw setup packets and data stages.
//! Vendor requests are routed by `bRequest` to the handler that claimed the
//! request number; the chosen handler keeps receiving the data stages until
//! the next setup packet.

use heapless::Vec;

/// `bmRequestType` bits selecting the request type
pub const REQUEST_TYPE_MASK: u8 = 0x60;
/// Vendor request type
pub const REQUEST_TYPE_VENDOR: u8 = 0x40;

/// Decoded control setup packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupPacket {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    /// Decode the eight setup bytes (little-endian fields)
    pub const fn parse(data: [u8; 8]) -> Self {
        Self {
            request_type: data[0],
            request: data[1],
            value: u16::from_le_bytes([data[2], data[3]]),
            index: u16::from_le_bytes([data[4], data[5]]),
            length: u16::from_le_bytes([data[6], data[7]]),
        }
    }

    pub const fn is_vendor(&self) -> bool {
        self.request_type & REQUEST_TYPE_MASK == REQUEST_TYPE_VENDOR
    }
}

/// Handler for a family of vendor requests
pub trait VendorHandler {
    /// Check if the handler serves this `bRequest`
    fn claims(&self, request: u8) -> bool;

    /// Handle the setup stage, returning the number of bytes to send back
    fn setup(&mut self, packet: &SetupPacket) -> u16;

    /// Host to device data. Returns `true` on the last chunk.
    fn write(&mut self, _data: &[u8]) -> bool {
        true
    }

    /// Device to host data. Returns the number of bytes written to `buf`.
    fn read(&mut self, _buf: &mut [u8]) -> usize {
        0
    }

    /// Device to host transfer finished
    fn read_finished(&mut self) {}
}

/// Routes vendor requests to at most `H` handlers
pub struct UsbDispatcher<'a, const H: usize> {
    handlers: Vec<&'a mut dyn VendorHandler, H>,
    /// Serves vendor requests no other handler claimed (HID)
    fallback: Option<&'a mut dyn VendorHandler>,
    /// Handler selected by the last setup packet
    active: Option<Route>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Handler(usize),
    Fallback,
}

impl<'a, const H: usize> UsbDispatcher<'a, H> {
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
            fallback: None,
            active: None,
        }
    }

    /// Register a handler. Earlier handlers win when claims overlap.
    ///
    /// Returns the handler back if all slots are taken.
    pub fn register(
        &mut self,
        handler: &'a mut dyn VendorHandler,
    ) -> Result<(), &'a mut dyn VendorHandler> {
        self.handlers.push(handler)
    }

    /// Set the handler for otherwise unclaimed vendor requests
    pub fn set_fallback(&mut self, handler: &'a mut dyn VendorHandler) {
        self.fallback = Some(handler);
    }

    /// Setup stage. Non-vendor and unclaimed requests return no data.
    pub fn setup(&mut self, data: [u8; 8]) -> u16 {
        let packet = SetupPacket::parse(data);
        if !packet.is_vendor() {
            return 0;
        }

        self.active = self
            .handlers
            .iter()
            .position(|handler| handler.claims(packet.request))
            .map(Route::Handler)
            .or_else(|| self.fallback.as_ref().map(|_| Route::Fallback));

        self.route().map_or(0, |handler| handler.setup(&packet))
    }

    /// Host to device data stage
    pub fn write(&mut self, data: &[u8]) -> bool {
        self.route().is_none_or(|handler| handler.write(data))
    }

    /// Device to host data stage
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        self.route().map_or(0, |handler| handler.read(buf))
    }

    pub fn read_finished(&mut self) {
        if let Some(handler) = self.route() {
            handler.read_finished();
        }
    }

    fn route(&mut self) -> Option<&mut (dyn VendorHandler + 'a)> {
        match self.active? {
            Route::Handler(index) => self.handlers.get_mut(index).map(|handler| &mut **handler),
            Route::Fallback => self.fallback.as_deref_mut(),
        }
    }
}

impl<const H: usize> Default for UsbDispatcher<'_, H> {
    fn default() -> Self {
        Self::new()
    }
}
