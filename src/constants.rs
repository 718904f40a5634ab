// VENDOR_ID is the USB vendor id of the Finch (BirdBrain Technologies).
pub const VENDOR_ID: u16 = 0x2354;

// PRODUCT_ID is the USB product id of the Finch.
pub const PRODUCT_ID: u16 = 0x1111;

// FRAME_LEN is the size of every command and response frame. Byte 0 is the
// HID report id and is always left at zero.
pub const FRAME_LEN: usize = 9;

// DEFAULT_READ_TIMEOUT_MS is how long a single HID read waits for a report.
pub const DEFAULT_READ_TIMEOUT_MS: i32 = 1000;

// Command tags, written to byte 1 of a frame.
pub const LED_CMD: u8 = b'O';
pub const MOTOR_CMD: u8 = b'M';
pub const STOP_CMD: u8 = b'X';
pub const IDLE_CMD: u8 = b'R';
pub const BUZZER_CMD: u8 = b'B';
pub const TEMPERATURE_CMD: u8 = b'T';
pub const LIGHT_CMD: u8 = b'L';
pub const ACCELERATION_CMD: u8 = b'A';
pub const OBSTACLES_CMD: u8 = b'I';

// TAG_IDX is the frame offset of the command tag.
pub const TAG_IDX: usize = 1;

// ECHO_SEQ_IDX is where the device echoes the sequence number of the request
// a response belongs to.
pub const ECHO_SEQ_IDX: usize = 7;

// SEQ_IDX carries the sequence number of an outgoing read request.
pub const SEQ_IDX: usize = 8;

// TAP_MASK selects the accelerometer status bit that is cleared after a tap.
pub const TAP_MASK: u8 = 0x20;

// SHAKE_MASK selects the accelerometer status bit that is set after a shake.
pub const SHAKE_MASK: u8 = 0x80;

// Wheel directions accepted by the motor command.
pub const FORWARD: u8 = 0;
pub const REVERSE: u8 = 1;
