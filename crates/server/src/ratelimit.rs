use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// 机会性清理阈值：map 超过该大小时顺带清掉已过期窗口
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
pub struct RateDecision {
    pub success: bool,
    pub remaining: u32,
    pub reset_at: SystemTime,
}

/// 固定窗口限流器。纯进程内状态：重启即清零，多实例间不共享，
/// 只适合低风险节流，不能当安全边界用。
#[derive(Clone)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    windows: Arc<Mutex<HashMap<String, WindowState>>>,
}

struct WindowState {
    count: u32,
    reset_at: SystemTime,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, SystemTime::now())
    }

    fn check_at(&self, key: &str, now: SystemTime) -> RateDecision {
        let mut map = self.windows.lock().unwrap();

        if map.len() > SWEEP_THRESHOLD {
            map.retain(|_, w| w.reset_at > now);
        }

        let window = self.window;
        let state = map.entry(key.to_string()).or_insert_with(|| WindowState {
            count: 0,
            reset_at: now + window,
        });

        // 窗口到期即重置，固定边界，不滑动
        if now >= state.reset_at {
            state.count = 0;
            state.reset_at = now + window;
        }

        if state.count >= self.max_requests {
            return RateDecision {
                success: false,
                remaining: 0,
                reset_at: state.reset_at,
            };
        }

        state.count += 1;
        RateDecision {
            success: true,
            remaining: self.max_requests - state.count,
            reset_at: state.reset_at,
        }
    }
}
