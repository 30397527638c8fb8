use anyhow::anyhow;

macro_rules! impl_safebuf {
    ($($type: ident),*) => {
        /// Bounds checked reads over a [`bytes::Buf`]. Reading past the end is
        /// an error instead of a panic.
        pub trait SafeBuf: bytes::Buf {
            paste::paste! {
                $(
                fn [<try_get_ $type>](&mut self) -> anyhow::Result<$type> {
                    if self.remaining() >= std::mem::size_of::<$type>() {
                        Ok(self.[<get_ $type>]())
                    } else {
                        Err(anyhow!("out of bytes"))
                    }
                }
                )*
            }
        }

        impl<T: bytes::Buf> SafeBuf for T { }
    }
}

impl_safebuf!(u8, u32, i32);
