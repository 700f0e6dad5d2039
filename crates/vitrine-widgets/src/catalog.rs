#![forbid(unsafe_code)]

//! Static page content rendered by the showcase and the service panel.

/// A partner logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logo {
    /// Display name (also the image alt text).
    pub name: &'static str,
    /// Image URL.
    pub img: &'static str,
}

/// A service entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    /// Title shown on the option and the detail card.
    pub title: &'static str,
    /// Material icon name.
    pub icon: &'static str,
    /// Background image URL.
    pub image: &'static str,
    /// Detail card body.
    pub description: &'static str,
    /// Key points. Carried with the entry but not rendered.
    pub highlights: [&'static str; 3],
}

/// Showcase tab labels, one per category.
pub const CATEGORIES: [&str; 5] = [
    "Developers & Asset Owners",
    "Lenders & Banks",
    "NBFCs & Alternative Capital",
    "Funds & Institutional Investors",
    "Global Clients",
];

/// Showcase descriptions, parallel to [`CATEGORIES`].
pub const DESCRIPTIONS: [&str; 5] = [
    "Working with leading real estate developers to deliver execution certainty, cost discipline, and real-time visibility across large-scale residential and commercial assets.",
    "Partnering with top-tier banks to mitigate risk, ensure covenant compliance, and streamline loan monitoring through automated intelligence.",
    "Empowering NBFCs and alternative capital providers with high-yield asset management strategies and rigorous distressed asset recovery.",
    "Providing institutional investors with granular portfolio transparency, real-time ROI analytics, and strategic exit planning.",
    "Delivering standardized, compliant, and scalable asset management solutions for multinational corporations and global real estate portfolios.",
];

/// Partner logo pool shared by every category.
pub const LOGOS: [Logo; 7] = [
    Logo {
        name: "Brookfield",
        img: "https://lh3.googleusercontent.com/aida-public/AB6AXuCBKZAg7TR8EYFXhZ5BJoKpOjnH-opdJBS6rK_BuOdOySbHg9aRkrvNubucH2CIcseGcma16GQ5oe4OfBY3x8fxS9Aqw7bWWalSG1ekMeWlsEpQdDWUj0dVlFFL-P2wtWYitQKLvJjV6vAC56-hiy1KEWZYrXh7bM2K3TWOlXq-rhZRjTXQVJXUUSKPM4nmeDG0QsHKO9Yxw2okvleh7pWWSC6V6K8qQ7PZwC_PFIl3m5wdpP_lGm6ZXxf9NIi7_WWpMcQMMHnBlpk",
    },
    Logo {
        name: "Transcon",
        img: "https://lh3.googleusercontent.com/aida-public/AB6AXuACPVpkSsTBWO6koj-hZF3mEPBSznTCFPbU8qTAxUa3gAX7zSO82wkSjpGRI1M4BAo36DizJcPRfeQ4g0mXsg2u4Lb5YXjghZ5D2V-zdrdRp9APqP3kBoiKgQeSnDhzwwLXndNw2Q4Ujna2MQB4s7y8eOqpsCK4KAy8RwDGv8lYmlk8B31amGN6rc_3ZMOzjsGRSomMIuDAdGjLcNLD_VHZs7o3ckFrD2BmUEO9RWnGyFUNmIYSRQzrKrpx3NtnkiSIInvz6E3KGTs",
    },
    Logo {
        name: "Kanakia",
        img: "https://lh3.googleusercontent.com/aida-public/AB6AXuBU7oTp_JZ_IIGEFSa9sjz8BvZwxFzE5O-b2pXrUDa0RVV-o-P_r0racyIKFgLBJ5t8okNG6rQu7iTqpc7_8_bUWtXwB-qGmtagpI0WdAZ6LiCLjsp8d0HiAZtMw-stx18dOUqrGllftAsxmhBk4yVm7i7St4k8DD54eMbkgkgDHE99dfvHDgJJP0Rzl8-8P5_QaeoKB6EGFSKd1qT7Z97ob4mmVgD9RSmFAYiq9jq6lu-iBAQOgZnZdGSlgOPpvWPWKam2xKuLII8",
    },
    Logo {
        name: "Merusri",
        img: "https://lh3.googleusercontent.com/aida-public/AB6AXuA3BXzWKIxJK8t8nW9guUP3yKwLAPxQJV9loXcXXqigTQHGWUaiRZGbaKKrymgilT4xnYPFciE0Fi5xvqFnPzybtvrDt2cMMnRd8rLT5qtsw3HGqVq892LTSWxbOQn1ANhvlTlNdPINJnV5A6VkdXomg9MNsSlMavsard8mguQH6LWXPjtPiI6lIUHw2NlO5_DUunvnybRaRsJ1gWebKaZ6cu3hWIOocQGLa7qn_zm-plz616Qh0sREv4z-A6M0gR_tT9XYZKaPkcM",
    },
    Logo {
        name: "Saridena",
        img: "https://lh3.googleusercontent.com/aida-public/AB6AXuA20XomIsIclnu2nriySVPUy3PHMKaEoorEBkbWsVzqXVTFoke4ET3gGY95oi-nzAdIf-EZpCELWj5FkqMjZHhiPgjJz1OoqsL-dJuBLWF1ojGRVcN7-qfwQrYAMsUIcxUMvK_UnlU1qx4GRXhavbKIvn0vTd0ToKU-NUwN47yuNIqPZp5aKpWDQjJZTD53rcGtiKYlucBYVW5MS0xMoJFhe9PuFCZgBCWb5SDh7v09BwRIy6rDxMBHKoebhLzpNkYRaqkBdObooe4",
    },
    Logo {
        name: "B.E.C.",
        img: "https://lh3.googleusercontent.com/aida-public/AB6AXuDGGQmea4pjm9KfF-eafAUuOHRwb3pkIYTmxGMJBQ3iGOxRBZfF_PCTbdsr9-uXmKWPwlYBKWHOZYpkgzTo_-jCNXvU_L-xgGld_E-PpaUf7OXjiKgjDJXe1BvRqiuHv7CUCdKNi20F-NWdxM9IKJ2wO0t55elMWWSzZhGC3BDNWk-HVIrGBj0WHxfY4w_XT0Qrz152pGe1011Hjhj5slYiNUHxvxhjhRWmWz8mwhF7WFtywASHtBUuCkk016nDIz1-isV3i_2stR8",
    },
    Logo {
        name: "Clearpack",
        img: "https://lh3.googleusercontent.com/aida-public/AB6AXuBWfKYxuQFlgJG3z61IYbJgVGPrFkXuxZ3nluhEuhHiKvY_WLr1qRoXlrrH89YlTiggTFhomwzvzvXT8ArM49Nui4cSnGsVbdyablkp6zJsQ2W43_WYUO8BcA0hXdzllMEnHfQ03TuSDV2E6svxwSb_NQvVLSUJdyl011n0hZyrYJlH_PXlui17TJxTwINV0T3hRGqyXP-j-ovbtOcli-XlXE-63T3F-85awMlsjwtE4pBTUVr4zg3nu3epDLCbxITXIsOUgF2CNrA",
    },
];

/// Service panel entries.
pub const SERVICES: [Service; 5] = [
    Service {
        title: "Construction progress & cost tracking",
        icon: "foundation",
        image: "https://images.unsplash.com/photo-1503387762-592deb58ef4e?auto=format&fit=crop&q=80&w=2531",
        description: "Ensure every brick and dollar is accounted for with real-time field reporting and automated budget variance analysis.",
        highlights: ["Automated budget tracking", "Field report synchronization", "Variance early-warnings"],
    },
    Service {
        title: "Sales velocity and collection monitoring",
        icon: "trending_up",
        image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&q=80&w=2426",
        description: "Optimize cash inflows with granular tracking of unit sales, booking speeds, and collection aging reports.",
        highlights: ["Unit-level sales visibility", "Aging schedule automation", "Revenue forecasting"],
    },
    Service {
        title: "Cashflow and fund-flow intelligence",
        icon: "account_balance_wallet",
        image: "https://images.unsplash.com/photo-1554224155-6726b3ff858f?auto=format&fit=crop&q=80&w=2626",
        description: "Maintain institutional-grade fund control with transparent movement tracking across projects and entities.",
        highlights: ["End-to-end fund tracking", "Escrow management", "Treasury dashboards"],
    },
    Service {
        title: "NOC and approval workflows",
        icon: "assignment_turned_in",
        image: "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?auto=format&fit=crop&q=80&w=2670",
        description: "Expedite project timelines by digitizing compliance, NOC applications, and bureaucratic approval stages.",
        highlights: ["Document lifecycle tracking", "Automated reminders", "Audit-ready storage"],
    },
    Service {
        title: "Compliance, covenant & risk tracking",
        icon: "security",
        image: "https://images.unsplash.com/photo-1551288049-bbda48658a7d?auto=format&fit=crop&q=80&w=2340",
        description: "Protect investor interests with proactive monitoring of loan covenants, legal risks, and regulatory adherence.",
        highlights: ["Covenant breach alerts", "Risk heat-maps", "Institutional reporting"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_match_categories() {
        assert_eq!(CATEGORIES.len(), DESCRIPTIONS.len());
        assert!(DESCRIPTIONS.iter().all(|d| !d.is_empty()));
    }

    #[test]
    fn logo_names_are_unique() {
        let mut names: Vec<&str> = LOGOS.iter().map(|l| l.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LOGOS.len());
    }
}
