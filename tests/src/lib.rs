mod bridging;
mod util;
