//! Последовательный обход кадров.
//!
//! Границы кадров известны только из поля `frame_size` каждого кадра, поэтому
//! обход строго последовательный: испорченный `frame_size` должен остановить
//! разбор до того, как последующие байты будут приняты за заголовки.

use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};
use sonar_types::{FormatVariant, FrameLayout, FILE_HEADER_SIZE};

use crate::binary::read_u16_le;

/// Причина остановки обхода. Ни одна из них не является ошибкой.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanEnd {
    /// Последний кадр закончился ровно на конце буфера
    #[default]
    EndOfBuffer,
    /// Остаток буфера меньше заголовка кадра
    TruncatedHeader,
    /// Кадр объявил нулевой размер
    ZeroFrameSize,
    /// Кадр объявил размер, выходящий за конец буфера
    FrameOverrun,
}

/// Непрерывный участок буфера `[position, position + frame_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Смещение начала кадра в буфере
    pub position: usize,
    /// Размер кадра, как он объявлен в заголовке
    pub frame_size: u16,
    /// Размер заголовка кадра для варианта формата
    pub header_size: usize,
}

impl RawFrame {
    /// Смещение первого байта после кадра.
    pub fn end(&self) -> usize {
        self.position + usize::from(self.frame_size)
    }

    /// Длина участка интенсивностей после заголовка (0, если кадр короче
    /// собственного заголовка).
    pub fn signal_len(&self) -> usize {
        usize::from(self.frame_size).saturating_sub(self.header_size)
    }

    /// Диапазон участка интенсивностей в буфере.
    pub fn signal_range(&self) -> Range<usize> {
        let start = self.position + self.header_size;

        start..start + self.signal_len()
    }
}

/// Курсор по кадрам буфера, начиная сразу после заголовка файла.
#[derive(Debug, Clone)]
pub struct FrameScanner<'a> {
    buf: &'a [u8],
    layout: &'static FrameLayout,
    position: usize,
    end: Option<ScanEnd>,
}

impl<'a> FrameScanner<'a> {
    pub fn new(
        buf: &'a [u8],
        variant: FormatVariant,
    ) -> Self {
        Self {
            buf,
            layout: variant.layout(),
            position: FILE_HEADER_SIZE,
            end: None,
        }
    }

    /// Текущее смещение курсора.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Причина остановки, если обход уже завершён.
    pub fn scan_end(&self) -> Option<ScanEnd> {
        self.end
    }

    fn stop(
        &mut self,
        reason: ScanEnd,
    ) -> Option<RawFrame> {
        debug!("Frame scan stopped at {}: {reason:?}", self.position);
        self.end = Some(reason);
        None
    }

    /// Следующий кадр или `None`, если обход завершён.
    pub fn next_frame(&mut self) -> Option<RawFrame> {
        if self.end.is_some() {
            return None;
        }

        let remaining = self.buf.len().saturating_sub(self.position);

        if remaining == 0 {
            return self.stop(ScanEnd::EndOfBuffer);
        }

        if remaining < self.layout.header_size {
            return self.stop(ScanEnd::TruncatedHeader);
        }

        let Some(frame_size) = read_u16_le(self.buf, self.position + self.layout.frame_size) else {
            return self.stop(ScanEnd::TruncatedHeader);
        };

        if frame_size == 0 {
            return self.stop(ScanEnd::ZeroFrameSize);
        }

        if usize::from(frame_size) > remaining {
            return self.stop(ScanEnd::FrameOverrun);
        }

        let frame = RawFrame {
            position: self.position,
            frame_size,
            header_size: self.layout.header_size,
        };

        self.position = frame.end();

        Some(frame)
    }
}

impl Iterator for FrameScanner<'_> {
    type Item = RawFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}

/// Индексный проход: собирает `(position, frame_size)` всех кадров без
/// декодирования.
pub fn index_frames(
    buf: &[u8],
    variant: FormatVariant,
) -> Vec<RawFrame> {
    FrameScanner::new(buf, variant).collect()
}
