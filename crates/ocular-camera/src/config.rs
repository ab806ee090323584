/// Configuration for a frame source.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    fps: u32,
    rotation_degrees: u32,
    buffer_count: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            rotation_degrees: 0,
            buffer_count: 4,
        }
    }
}

impl SourceConfig {
    /// Set the frames per second at which frames are delivered.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the rotation tag attached to every delivered frame, matching the
    /// device-orientation metadata a real camera would report.
    pub fn with_rotation_degrees(mut self, rotation_degrees: u32) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    /// Set the channel capacity between the capture thread and the consumer.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn rotation_degrees(&self) -> u32 {
        self.rotation_degrees
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }
}
